//! Ljung–Box portmanteau test for residual autocorrelation.
//!
//! Purpose
//! -------
//! Summarize whether standardized residuals still carry linear dependence
//! up to lag `L`:
//!
//! `Q = n (n + 2) Σ_{k=1..L} ρ̂_k² / (n − k)`,
//!
//! with `ρ̂_k = Σ_{t=k}^{n−1} (x_t − x̄)(x_{t−k} − x̄) / Σ_t (x_t − x̄)²`.
//! Under the null of no autocorrelation `Q ~ χ²(L)` asymptotically.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs pass [`validate_lagged_input`]: `1 ≤ L < n`, all finite.
//! - The reported p-value lies in `[0, 1]`.
//!
//! Conventions
//! -----------
//! - The result is a diagnostic annotation; no fit is rejected on it.
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::statistical_tests::{
    errors::{DiagError, DiagResult},
    validation::validate_lagged_input,
};

/// Default lag count used for residual diagnostics.
pub const DEFAULT_LJUNG_BOX_LAG: usize = 10;

/// Outcome of a Ljung–Box test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LjungBox {
    pub lag: usize,
    pub statistic: f64,
    pub p_value: f64,
}

impl LjungBox {
    /// Run the test on `data` with `lag` autocorrelations.
    ///
    /// # Errors
    /// - [`DiagError::InvalidLag`] for `lag == 0`.
    /// - [`DiagError::InsufficientData`] when `data.len() ≤ lag`.
    /// - [`DiagError::NonFiniteData`] for non-finite input.
    /// - [`DiagError::ZeroVariance`] for a constant series.
    pub fn ljung_box(data: &[f64], lag: usize) -> DiagResult<Self> {
        validate_lagged_input(data, lag)?;
        let n = data.len();
        let mean = data.iter().sum::<f64>() / n as f64;
        let denom: f64 = data.iter().map(|x| (x - mean).powi(2)).sum();
        if denom <= 0.0 {
            return Err(DiagError::ZeroVariance);
        }

        let nf = n as f64;
        let statistic = nf
            * (nf + 2.0)
            * (1..=lag)
                .map(|k| {
                    let rho = calc_autocovariance_sum(data, k, mean) / denom;
                    rho * rho / (n - k) as f64
                })
                .sum::<f64>();
        let p_value = match ChiSquared::new(lag as f64) {
            Ok(dist) => dist.sf(statistic).clamp(0.0, 1.0),
            Err(_) => return Err(DiagError::InvalidLag { lag }),
        };
        Ok(Self { lag, statistic, p_value })
    }
}

/// `Σ_{t=k}^{n−1} (x_t − x̄)(x_{t−k} − x̄)`.
#[inline]
fn calc_autocovariance_sum(data: &[f64], k: usize, mean: f64) -> f64 {
    data[k..].iter().zip(data).map(|(y_t, y_lag)| (y_t - mean) * (y_lag - mean)).sum()
}
