//! statistical_tests::errors — error type for residual diagnostics.
//!
//! Purpose
//! -------
//! Report malformed diagnostic inputs (too few residuals for the requested
//! lag, non-finite values, degenerate series) and invalid diagnostic
//! configuration through one enum, [`DiagError`].
//!
//! Conventions
//! -----------
//! - A lag of zero is a configuration error; a series not longer than the
//!   lag is a data error.
//! - Messages are phrased in terms of domain constraints (“1 ≤ L < n”)
//!   rather than implementation details.
use thiserror::Error;

use crate::errors::ErrorKind;

pub type DiagResult<T> = Result<T, DiagError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagError {
    // ---- Data ----
    #[error("Diagnostics Error: {n} residuals, lag {lag} requires more than {lag}")]
    InsufficientData { n: usize, lag: usize },

    #[error("Diagnostics Error: residual at index {index} is non-finite: {value}")]
    NonFiniteData { index: usize, value: f64 },

    #[error("Diagnostics Error: residuals have zero variance")]
    ZeroVariance,

    // ---- Configuration ----
    #[error("Diagnostics Error: lag must satisfy 1 ≤ L < n, got {lag}")]
    InvalidLag { lag: usize },
}

impl DiagError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DiagError::InsufficientData { .. }
            | DiagError::NonFiniteData { .. }
            | DiagError::ZeroVariance => ErrorKind::Data,
            DiagError::InvalidLag { .. } => ErrorKind::Config,
        }
    }
}
