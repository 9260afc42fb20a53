//! Rolling realized volatility.
//!
//! `RV_t = sqrt(Σ_{s=t−w+1..t} r_s²)` over a window of `w` returns (default
//! 5), in the units of the returns. The first `w − 1` entries are missing.
//! The evaluator's reference is the last available value in percent.
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    evaluation::errors::{EvalError, EvalResult},
    series::ReturnSeries,
};

/// Default rolling window, in trading days.
pub const DEFAULT_RV_WINDOW: usize = 5;

/// Realized volatility at one date, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RealizedVolPoint {
    pub date: NaiveDate,
    pub realized_vol_pct: Option<f64>,
}

/// Rolling realized volatility of `returns`.
///
/// # Errors
/// [`EvalError::InvalidWindow`] when `window == 0`.
pub fn realized_volatility(returns: &[f64], window: usize) -> EvalResult<Vec<Option<f64>>> {
    if window == 0 {
        return Err(EvalError::InvalidWindow { window });
    }
    Ok((0..returns.len())
        .map(|t| {
            (t + 1 >= window).then(|| {
                returns[t + 1 - window..=t].iter().map(|r| r * r).sum::<f64>().sqrt()
            })
        })
        .collect())
}

/// Realized volatility path in percent, aligned with the series dates.
///
/// # Errors
/// [`EvalError::InvalidWindow`] when `window == 0`.
pub fn realized_volatility_path(
    series: &ReturnSeries, window: usize,
) -> EvalResult<Vec<RealizedVolPoint>> {
    let rv = realized_volatility(series.values(), window)?;
    Ok(series
        .dates()
        .iter()
        .zip(rv)
        .map(|(&date, value)| RealizedVolPoint { date, realized_vol_pct: value.map(|v| v * 100.0) })
        .collect())
}

/// Most recent realized volatility in percent: the evaluation anchor.
///
/// # Errors
/// - [`EvalError::InvalidWindow`] when `window == 0`.
/// - [`EvalError::InsufficientData`] when the series is shorter than the
///   window.
pub fn realized_vol_anchor_pct(returns: &[f64], window: usize) -> EvalResult<f64> {
    realized_volatility(returns, window)?
        .into_iter()
        .rev()
        .flatten()
        .next()
        .map(|v| v * 100.0)
        .ok_or(EvalError::InsufficientData { n: returns.len(), window })
}
