//! Error handling for post-estimation inference.
//!
//! `InferenceError` covers failures while turning a fitted log-likelihood
//! into standard errors: derivative evaluation problems (forwarded from the
//! optimizer layer), malformed score matrices, and degenerate curvature.
use thiserror::Error;

use crate::{errors::ErrorKind, optimization::errors::OptError};

pub type InferenceResult<T> = Result<T, InferenceError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    /// Finite-difference evaluation of the log-likelihood failed.
    #[error("Inference Error: {0}")]
    Derivatives(#[from] OptError),

    #[error("Inference Error: score matrix has no observations")]
    EmptyScores,

    #[error("Inference Error: score matrix has {found} columns, expected {expected}")]
    ScoreDimMismatch { expected: usize, found: usize },

    /// No eigenvalue of the observed information exceeds the floor.
    #[error("Inference Error: observed information is not positive definite in any direction")]
    DegenerateInformation,

    #[error("Inference Error: standard error for parameter {index} is not finite ({value})")]
    NonFiniteStandardError { index: usize, value: f64 },
}

impl InferenceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InferenceError::Derivatives(err) => err.kind(),
            _ => ErrorKind::Numerical,
        }
    }
}
