//! GARCH input data — scaled returns plus the sample moments used for
//! initialization.
//!
//! Purpose
//! -------
//! Convert a validated [`ReturnSeries`] into the numeric payload consumed by
//! the likelihood: returns multiplied by a scale factor (×100 by default, so
//! the optimizer works in percent units) together with their sample mean and
//! sample variance.
//!
//! Invariants & assumptions
//! ------------------------
//! - `returns` is non-empty and finite (guaranteed by `ReturnSeries`).
//! - `returns.len() >= min_obs` (checked here).
//! - `sample_variance > 0`; a constant series is a data error.
//!
//! Conventions
//! -----------
//! - The sample variance uses the `n − 1` denominator; it seeds `σ²_0` (or
//!   `ln σ²_0` for EGARCH) and the starting values.
use ndarray::Array1;

use crate::{
    garch::{
        core::validation::{validate_length, validate_scale},
        errors::{GarchError, GarchResult},
    },
    series::ReturnSeries,
};

/// Scaled return payload for GARCH estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchData {
    /// Returns multiplied by `scale`.
    pub returns: Array1<f64>,
    /// Multiplicative factor applied to the raw returns.
    pub scale: f64,
    /// Sample mean of `returns`.
    pub sample_mean: f64,
    /// Sample variance (`n − 1` denominator) of `returns`.
    pub sample_variance: f64,
}

impl GarchData {
    /// Build the payload from a validated series.
    ///
    /// # Errors
    /// - [`GarchError::InvalidScale`] for a non-positive or non-finite scale.
    /// - [`GarchError::TooFewObservations`] when the series is shorter than
    ///   `min_obs`.
    /// - [`GarchError::ZeroVariance`] for a constant series.
    pub fn new(series: &ReturnSeries, scale: f64, min_obs: usize) -> GarchResult<Self> {
        validate_scale(scale)?;
        validate_length(series.len(), min_obs)?;
        let returns = series.scaled(scale);
        let n = returns.len() as f64;
        let sample_mean = returns.sum() / n;
        let sample_variance =
            returns.iter().map(|r| (r - sample_mean).powi(2)).sum::<f64>() / (n - 1.0);
        if sample_variance.is_nan() || sample_variance <= 0.0 {
            return Err(GarchError::ZeroVariance);
        }
        Ok(GarchData { returns, scale, sample_mean, sample_variance })
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }
}
