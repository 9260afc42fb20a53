//! Bridge from a [`LogLikelihood`] to `argmin`'s minimization traits.
//!
//! `argmin` minimizes, so the adapter reports the cost `c(θ) = −ℓ(θ)` and
//! negates analytic gradients. GARCH models supply no analytic gradient,
//! so their L-BFGS steps use finite differences of the cost itself, which
//! already carries the right sign.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        finite_diff::run_fd_diff,
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// A model and its data, seen by `argmin` as a cost function with a
/// gradient.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }

    /// Central differences of the cost. When a probe point fails or the
    /// estimate is not finite, fall back to forward differences, which
    /// never step below `θ`.
    fn numerical_gradient(&self, theta: &Theta) -> Result<Grad, Error> {
        let failure: RefCell<Option<Error>> = RefCell::new(None);
        let cost = |point: &Theta| -> f64 {
            match self.cost(point) {
                Ok(value) => value,
                Err(err) => {
                    let mut slot = failure.borrow_mut();
                    if slot.is_none() {
                        *slot = Some(err);
                    }
                    f64::NAN
                }
            }
        };
        let central = theta.central_diff(&cost);
        if failure.borrow().is_none() && validate_grad(&central, theta.len()).is_ok() {
            return Ok(central);
        }
        Ok(run_fd_diff(theta, &cost, &failure)?)
    }
}

impl<F: LogLikelihood> CostFunction for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Output = Cost;

    /// `c(θ) = −ℓ(θ)`.
    ///
    /// # Errors
    /// Model errors from `value`, or [`OptError::NonFiniteCost`].
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let loglik = self.f.value(theta, self.data)?;
        if !loglik.is_finite() {
            return Err(OptError::NonFiniteCost { value: loglik }.into());
        }
        Ok(-loglik)
    }
}

impl<F: LogLikelihood> Gradient for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// `−∇ℓ(θ)` from the model when available, otherwise a numerical
    /// gradient of the cost.
    ///
    /// # Errors
    /// Model errors other than `GradientNotImplemented`, cost failures
    /// during differencing, and gradient validation errors.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, theta.len())?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => self.numerical_gradient(theta),
            Err(err) => Err(err.into()),
        }
    }
}
