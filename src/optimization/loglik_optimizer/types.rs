//! Numeric aliases and concrete `argmin` solver types.
//!
//! Parameters, gradients and Hessians are `ndarray` containers over `f64`.
//! The cost is the negated log-likelihood; the sign flip lives in the
//! adapter, never here.
use std::collections::HashMap;

use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    neldermead::NelderMead,
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};

/// Unconstrained optimizer coordinates `θ`.
pub type Theta = Array1<f64>;
/// Gradient with the shape of [`Theta`].
pub type Grad = Array1<f64>;
/// Square `p × p` second-derivative matrix.
pub type Hessian = Array2<f64>;
/// `c(θ) = −ℓ(θ)`.
pub type Cost = f64;
/// `argmin` evaluation counters keyed by name, e.g. `"cost_count"`.
pub type FnEvalMap = HashMap<String, u64>;

/// L-BFGS history length when [`MLEOptions::lbfgs_mem`] is unset.
///
/// [`MLEOptions::lbfgs_mem`]: crate::optimization::loglik_optimizer::MLEOptions
pub const DEFAULT_LBFGS_MEM: usize = 7;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
/// Derivative-free fallback when L-BFGS fails on a rough surface.
pub type NelderMeadSolver = NelderMead<Theta, Cost>;
