//! optimization — MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer used to fit volatility models: an
//! `argmin`-backed log-likelihood maximizer, numerically stable parameter
//! transforms, and a single error/result surface.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer` maximizes a log-likelihood `ℓ(θ)` with L-BFGS and
//!   an optional Nelder–Mead fallback, and exposes finite-difference
//!   derivative helpers for inference.
//! - `numerical_stability` maps unconstrained optimizer coordinates into
//!   positive, simplex-constrained, or bounded model parameters.
//! - `errors::OptError` normalizes configuration issues, numerical failures,
//!   backend errors, and model-side failures.
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers operate in an unconstrained space `θ`; invalid states are
//!   reported as `OptError`, never panics.
//! - Mapping between `θ` and structured model parameters (e.g. GARCH
//!   `(μ, ω, α, β)`) lives in the model layer on top of the transforms here.
//!
//! Conventions
//! -----------
//! - All solvers maximize `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`; outcomes
//!   report `ℓ`.
//! - This layer only emits `tracing` debug events; progress reporting
//!   belongs to callers.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use volregime::optimization::prelude::*;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
}
