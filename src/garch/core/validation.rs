//! Validation helpers for GARCH inputs and parameter vectors.
//!
//! Each helper returns a typed [`GarchError`] instead of panicking so entry
//! points can fail fast with a classified error.
use ndarray::ArrayView1;

use crate::garch::{
    core::variant::GarchVariant,
    errors::{GarchError, GarchResult},
};

/// Smallest series length any variant will accept.
pub const MIN_OBS_FLOOR: usize = 10;

/// Check an optimizer-space or natural parameter vector: correct length for
/// `variant` and finite entries.
///
/// # Errors
/// - [`GarchError::ThetaLength`] on a length mismatch.
/// - [`GarchError::NonFiniteTheta`] on the first non-finite entry.
pub fn validate_theta(theta: ArrayView1<f64>, variant: GarchVariant) -> GarchResult<()> {
    let expected = variant.n_params();
    if theta.len() != expected {
        return Err(GarchError::ThetaLength { expected, found: theta.len() });
    }
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(GarchError::NonFiniteTheta { index, value });
    }
    Ok(())
}

/// Check a sample size against the configured minimum.
///
/// # Errors
/// [`GarchError::TooFewObservations`] when `n < min`.
pub fn validate_length(n: usize, min: usize) -> GarchResult<()> {
    if n < min {
        return Err(GarchError::TooFewObservations { n, min });
    }
    Ok(())
}

/// Check the return scaling factor.
///
/// # Errors
/// [`GarchError::InvalidScale`] unless `scale` is finite and positive.
pub fn validate_scale(scale: f64) -> GarchResult<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(GarchError::InvalidScale { value: scale });
    }
    Ok(())
}
