//! Errors for GARCH-family volatility models.
//!
//! [`GarchError`] covers data validation, option checks, recursion failures,
//! post-fit stationarity checks, and optimizer outcomes. Every variant maps
//! onto the crate-wide [`ErrorKind`] so the orchestration layer can decide
//! whether a failed variant is recorded or aborts the analysis.
//!
//! ## Conventions
//! - Indices are 0-based positions in the return series.
//! - Variance values are in scaled units (percent² with the default ×100
//!   scaling).
//! - Optimizer failures keep their original class: a `GarchError` raised
//!   inside the likelihood crosses the optimizer as `OptError::Model` and is
//!   reported with the same kind.
use thiserror::Error;

use crate::{
    errors::ErrorKind,
    garch::core::variant::GarchVariant,
    optimization::errors::OptError,
    series::SeriesError,
};

/// Result alias for GARCH operations.
pub type GarchResult<T> = Result<T, GarchError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GarchError {
    // ---- Input/data validation ----
    #[error("GARCH Error: {0}")]
    Series(#[from] SeriesError),

    #[error("GARCH Error: {n} observations, at least {min} required")]
    TooFewObservations { n: usize, min: usize },

    #[error("GARCH Error: return series has zero variance")]
    ZeroVariance,

    // ---- Options validation ----
    #[error("GARCH Error: scale factor {value} must be finite and > 0")]
    InvalidScale { value: f64 },

    #[error("GARCH Error: variance guards ({min}, {max}) invalid: {reason}")]
    InvalidVarianceGuards { min: f64, max: f64, reason: &'static str },

    #[error("GARCH Error: minimum observation count {value} must be at least {floor}")]
    InvalidMinObservations { value: usize, floor: usize },

    #[error("GARCH Error: unknown variant '{name}'")]
    UnknownVariant { name: String },

    #[error("GARCH Error: parameter vector has length {found}, expected {expected}")]
    ThetaLength { expected: usize, found: usize },

    #[error("GARCH Error: parameter {index} is non-finite: {value}")]
    NonFiniteTheta { index: usize, value: f64 },

    // ---- Recursion / likelihood ----
    #[error("GARCH Error: conditional variance at index {index} is not finite ({value})")]
    NonFiniteVariance { index: usize, value: f64 },

    #[error("GARCH Error: log-likelihood is not finite ({value})")]
    NonFiniteLikelihood { value: f64 },

    // ---- Post-fit checks ----
    #[error("GARCH Error: {variant} estimate is non-stationary (persistence {persistence})")]
    NonStationary { variant: GarchVariant, persistence: f64 },

    #[error("GARCH Error: {variant} did not converge after {iterations} iterations ({status})")]
    NotConverged { variant: GarchVariant, iterations: usize, status: String },

    // ---- Optimizer ----
    #[error("GARCH Error: optimization failed: {0}")]
    Optimization(OptError),
}

impl GarchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GarchError::Series(_)
            | GarchError::TooFewObservations { .. }
            | GarchError::ZeroVariance => ErrorKind::Data,
            GarchError::InvalidScale { .. }
            | GarchError::InvalidVarianceGuards { .. }
            | GarchError::InvalidMinObservations { .. }
            | GarchError::UnknownVariant { .. }
            | GarchError::ThetaLength { .. }
            | GarchError::NonFiniteTheta { .. } => ErrorKind::Config,
            GarchError::NonFiniteVariance { .. }
            | GarchError::NonFiniteLikelihood { .. }
            | GarchError::NonStationary { .. } => ErrorKind::Numerical,
            GarchError::NotConverged { .. } => ErrorKind::Convergence,
            GarchError::Optimization(err) => err.kind(),
        }
    }
}

impl From<GarchError> for OptError {
    fn from(err: GarchError) -> Self {
        OptError::Model { kind: err.kind(), text: err.to_string() }
    }
}

impl From<OptError> for GarchError {
    fn from(err: OptError) -> Self {
        GarchError::Optimization(err)
    }
}
