//! loglik_optimizer::finite_diff — finite-difference derivative helpers.
//!
//! Purpose
//! -------
//! Provide the finite-difference derivatives the optimizer and the inference
//! layer need when a model has no analytic derivatives:
//! - first-order gradients for the L-BFGS adapter ([`run_fd_diff`]),
//! - second-order curvature of a scalar log-likelihood ([`loglik_hessian`]),
//! - per-observation score matrices ([`observation_jacobian`]).
//!
//! Key behaviors
//! -------------
//! - Gradients use `finitediff`'s forward differences with error capture:
//!   an error raised inside the objective closure is stored in a shared
//!   cell and surfaced after the sweep.
//! - Hessians use scalar central second differences with a relative step
//!   `h_i = ε^{1/4} · max(|θ_i|, 1)`. Nesting two finite-difference
//!   gradients amplifies rounding noise, so the stencil works on function
//!   values directly.
//! - Score matrices use central first differences of a vector-valued
//!   objective with step `ε^{1/3} · max(|θ_i|, 1)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every returned gradient, Hessian, or Jacobian has been validated for
//!   shape and finiteness.
//! - Objective errors short-circuit; partial derivatives are never returned.
//!
//! Conventions
//! -----------
//! - Derivatives are taken with respect to whatever coordinates the caller
//!   passes in. The GARCH layer passes natural parameters for standard
//!   errors and unconstrained coordinates for optimization.
//!
//! Testing notes
//! -------------
//! - Quadratic and linear objectives with known derivatives check accuracy;
//!   failing closures check error propagation.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use ndarray::Array2;
use std::cell::RefCell;

/// Forward-difference gradient with error capture and validation.
///
/// `func` must route any evaluation error into `closure_err` and return
/// `NaN` in that case; the cell is cleared on entry and inspected after the
/// finite-difference sweep.
///
/// # Errors
/// - The captured closure error, converted into `OptError`.
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` from
///   [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}

/// Central second-difference Hessian of a scalar objective.
///
/// Diagonal entries use `(f(θ+h_i) − 2f(θ) + f(θ−h_i)) / h_i²`; off-diagonal
/// entries use the four-point cross stencil divided by `4 h_i h_j`. The
/// result is symmetrized and validated.
///
/// # Errors
/// - Any error returned by `f`.
/// - `OptError::InvalidHessian` when an entry is not finite.
pub fn loglik_hessian<F>(f: F, theta: &Theta) -> OptResult<Hessian>
where
    F: Fn(&Theta) -> OptResult<f64>,
{
    let dim = theta.len();
    let steps: Vec<f64> = theta.iter().map(|x| hessian_step(*x)).collect();
    let f0 = f(theta)?;
    let mut hess = Array2::zeros((dim, dim));
    let mut point = theta.clone();

    for i in 0..dim {
        let hi = steps[i];
        point[i] = theta[i] + hi;
        let f_plus = f(&point)?;
        point[i] = theta[i] - hi;
        let f_minus = f(&point)?;
        point[i] = theta[i];
        hess[[i, i]] = (f_plus - 2.0 * f0 + f_minus) / (hi * hi);

        for j in 0..i {
            let hj = steps[j];
            let mut corner = |si: f64, sj: f64| -> OptResult<f64> {
                point[i] = theta[i] + si * hi;
                point[j] = theta[j] + sj * hj;
                let value = f(&point);
                point[i] = theta[i];
                point[j] = theta[j];
                value
            };
            let cross = corner(1.0, 1.0)? - corner(1.0, -1.0)? - corner(-1.0, 1.0)?
                + corner(-1.0, -1.0)?;
            hess[[i, j]] = cross / (4.0 * hi * hj);
            hess[[j, i]] = hess[[i, j]];
        }
    }

    symmetrize_hess(&mut hess);
    validate_hessian(&hess, dim)?;
    Ok(hess)
}

/// Central-difference Jacobian of a vector-valued objective.
///
/// Returns an `m × k` matrix whose row `t` is the gradient of the `t`-th
/// output with respect to `θ`. With per-observation log-likelihood
/// contributions as outputs, the rows are the observation scores.
///
/// # Errors
/// - Any error returned by `f`.
/// - `OptError::HessianDimMismatch` if `f` changes its output length.
/// - `OptError::InvalidGradient` when a derivative is not finite.
pub fn observation_jacobian<F>(f: F, theta: &Theta) -> OptResult<Array2<f64>>
where
    F: Fn(&Theta) -> OptResult<ndarray::Array1<f64>>,
{
    let dim = theta.len();
    let rows = f(theta)?.len();
    let mut jac = Array2::zeros((rows, dim));
    let mut point = theta.clone();

    for i in 0..dim {
        let h = f64::EPSILON.cbrt() * theta[i].abs().max(1.0);
        point[i] = theta[i] + h;
        let upper = f(&point)?;
        point[i] = theta[i] - h;
        let lower = f(&point)?;
        point[i] = theta[i];
        if upper.len() != rows || lower.len() != rows {
            return Err(OptError::HessianDimMismatch {
                expected: rows,
                found: (upper.len(), lower.len()),
            });
        }
        for t in 0..rows {
            let d = (upper[t] - lower[t]) / (2.0 * h);
            if !d.is_finite() {
                return Err(OptError::InvalidGradient {
                    index: i,
                    value: d,
                    reason: "Observation score must be finite.",
                });
            }
            jac[[t, i]] = d;
        }
    }
    Ok(jac)
}

// ---- Helper methods ----

fn hessian_step(x: f64) -> f64 {
    f64::EPSILON.powf(0.25) * x.abs().max(1.0)
}

/// Replace each off-diagonal pair with its average.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
