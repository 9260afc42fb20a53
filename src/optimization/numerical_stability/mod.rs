//! numerical_stability — numerically robust parameter transforms.
//!
//! Purpose
//! -------
//! Collect numerically stable scalar and vector transforms used to map
//! unconstrained optimizer coordinates into constrained volatility-model
//! parameters, together with the shared numeric tolerances.
//!
//! Key behaviors
//! -------------
//! - Positive parameters (ω) use `safe_softplus` and its inverse.
//! - Persistence weights (α, β, and γ/2 for threshold models) use the
//!   stationarity-scaled `safe_softmax`, so `α + β (+ γ/2) < 1` holds at
//!   every optimizer step.
//! - Log-variance persistence (EGARCH β) uses `bounded_unit`, keeping
//!   `|β| < 1`.
//!
//! Conventions
//! -----------
//! - All routines are pure, allocation-light `f64` helpers suitable for
//!   tight inner loops; they never log or touch global state.
//! - Domain validation (positivity, lengths) belongs to the model layer.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, STATIONARITY_MARGIN, bounded_unit, bounded_unit_inv, safe_softmax, safe_softplus,
    safe_softplus_inv, softmax_logits,
};
