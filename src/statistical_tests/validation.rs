//! statistical_tests::validation — shared input guards for diagnostics.
//!
//! Call these at the top of each diagnostic before any lag-based
//! computation. A successful return guarantees finite data and, for
//! [`validate_lagged_input`], `1 ≤ lag < n`.
use crate::statistical_tests::errors::{DiagError, DiagResult};

/// Reject non-finite residuals, reporting the first offender.
///
/// # Errors
/// [`DiagError::NonFiniteData`] at the first `NaN` or ±∞.
pub fn validate_finite(data: &[f64]) -> DiagResult<()> {
    match data.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(DiagError::NonFiniteData { index, value: data[index] }),
        None => Ok(()),
    }
}

/// Validate a residual series for a statistic computed up to `lag`.
///
/// # Errors
/// - [`DiagError::InvalidLag`] when `lag == 0`.
/// - [`DiagError::InsufficientData`] when `data.len() ≤ lag`.
/// - [`DiagError::NonFiniteData`] for non-finite entries.
pub fn validate_lagged_input(data: &[f64], lag: usize) -> DiagResult<()> {
    if lag == 0 {
        return Err(DiagError::InvalidLag { lag });
    }
    if data.len() <= lag {
        return Err(DiagError::InsufficientData { n: data.len(), lag });
    }
    validate_finite(data)
}
