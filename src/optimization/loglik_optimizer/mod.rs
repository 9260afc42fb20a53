//! loglik_optimizer — MLE-friendly, argmin-powered log-likelihood optimizer.
//!
//! Purpose
//! -------
//! Maximize log-likelihoods `ℓ(θ)` on top of `argmin`. Callers implement a
//! single trait, [`LogLikelihood`], and invoke [`maximize`] to run L-BFGS
//! with a configurable line search, tolerances, finite-difference gradients,
//! and an optional Nelder–Mead fallback.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] turns `ℓ(θ)` into the cost `c(θ) = -ℓ(θ)`.
//! - [`maximize`] validates the initial guess with [`LogLikelihood::check`],
//!   builds the solver via [`builders`], runs it via [`run`], and retries
//!   with Nelder–Mead when L-BFGS fails hard and a fallback is configured.
//! - [`finite_diff`] supplies gradients for the adapter plus Hessians and
//!   per-observation score matrices for standard errors.
//! - [`Tolerances`], [`MLEOptions`], and [`NelderMeadOptions`] are validated
//!   on construction.
//!
//! Invariants & assumptions
//! ------------------------
//! - User code implements `ℓ(θ)` and, optionally, `∇ℓ(θ)`, never the cost.
//! - [`LogLikelihood::value`] reports invalid inputs as [`OptError`] values,
//!   not panics.
//! - An [`OptimOutcome`] always carries a finite `theta_hat` and value;
//!   `converged` is `false` when the iteration budget ran out.
//!
//! Testing notes
//! -------------
//! - Submodule tests cover sign conventions ([`adapter`]), solver wiring
//!   ([`builders`]), derivative accuracy ([`finite_diff`]), option and
//!   outcome invariants ([`traits`]), and end-to-end maximization with the
//!   fallback path ([`api`]).
//!
//! [`OptError`]: crate::optimization::errors::OptError

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{
    LineSearcher, LogLikelihood, MLEOptions, NelderMeadOptions, OptimOutcome, SolverKind,
    Tolerances,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use volregime::optimization::loglik_optimizer::prelude::*;

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
