//! Errors for Gaussian-HMM regime detection.
//!
//! [`HmmError`] covers feature construction, option validation, emission
//! factorization and EM convergence. Each variant maps onto the crate-wide
//! [`ErrorKind`].
use thiserror::Error;

use crate::errors::ErrorKind;

pub type HmmResult<T> = Result<T, HmmError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HmmError {
    // ---- Data ----
    #[error("HMM Error: {n} feature rows cannot identify {states} states")]
    InsufficientData { n: usize, states: usize },

    #[error("HMM Error: feature {feature} has zero variance")]
    ZeroVariance { feature: usize },

    #[error("HMM Error: feature row {index} is non-finite")]
    NonFiniteFeature { index: usize },

    // ---- Configuration ----
    #[error("HMM Error: state count must be at least 1, got {value}")]
    InvalidStates { value: usize },

    #[error("HMM Error: option '{name}' = {value} invalid: {reason}")]
    InvalidOption { name: &'static str, value: f64, reason: &'static str },

    // ---- Numerical ----
    #[error("HMM Error: covariance of state {state} is not positive definite")]
    SingularCovariance { state: usize },

    #[error("HMM Error: log-likelihood is not finite ({value})")]
    NonFiniteLikelihood { value: f64 },

    // ---- Convergence ----
    #[error("HMM Error: EM did not converge in {iterations} iterations (last improvement {delta})")]
    NotConverged { iterations: usize, delta: f64 },
}

impl HmmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HmmError::InsufficientData { .. }
            | HmmError::ZeroVariance { .. }
            | HmmError::NonFiniteFeature { .. } => ErrorKind::Data,
            HmmError::InvalidStates { .. } | HmmError::InvalidOption { .. } => ErrorKind::Config,
            HmmError::SingularCovariance { .. } | HmmError::NonFiniteLikelihood { .. } => {
                ErrorKind::Numerical
            }
            HmmError::NotConverged { .. } => ErrorKind::Convergence,
        }
    }
}
