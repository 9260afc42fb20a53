//! evaluator — point-forecast accuracy against a realized-volatility anchor.
//!
//! Purpose
//! -------
//! Score the one-day-ahead volatility forecasts of an asset's models
//! against one realized-volatility reference: the most recent non-missing
//! rolling realized volatility, in percent.
//!
//! Key behaviors
//! -------------
//! - Records are grouped by `(asset, model)`; each group reports the mean
//!   absolute error and the root-mean-square error of its forecasts.
//! - Rows come out sorted by asset then model, so summaries are
//!   deterministic whatever the record order.
//!
//! Invariants & assumptions
//! ------------------------
//! - With a single forecast per model (the usual case) MAE and RMSE are both
//!   `|forecast − reference|`. This is a point comparison against a single
//!   anchor, not a rolling backtest.
//! - `mae ≥ 0`, `rmse ≥ mae`.
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    evaluation::{
        errors::{EvalError, EvalResult},
        realized::DEFAULT_RV_WINDOW,
    },
    garch::GarchFit,
};

/// Evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationOptions {
    /// Rolling window of the realized-volatility reference, in days.
    pub realized_window: usize,
}

impl EvaluationOptions {
    /// # Errors
    /// [`EvalError::InvalidWindow`] when `realized_window == 0`.
    pub fn new(realized_window: usize) -> EvalResult<Self> {
        let opts = Self { realized_window };
        opts.validate()?;
        Ok(opts)
    }

    /// # Errors
    /// [`EvalError::InvalidWindow`] when `realized_window == 0`.
    pub fn validate(&self) -> EvalResult<()> {
        if self.realized_window == 0 {
            return Err(EvalError::InvalidWindow { window: 0 });
        }
        Ok(())
    }
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self { realized_window: DEFAULT_RV_WINDOW }
    }
}

/// One-day-ahead volatility forecast of one model for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub asset: String,
    pub model: String,
    pub last_date: NaiveDate,
    pub one_day_ahead_vol_forecast_pct: f64,
}

impl ForecastRecord {
    /// Forecast record of a fitted GARCH-family model.
    pub fn from_fit(asset: &str, fit: &GarchFit) -> Self {
        Self {
            asset: asset.to_string(),
            model: fit.variant.name().to_string(),
            last_date: fit.last_date,
            one_day_ahead_vol_forecast_pct: fit.forecast_volatility_pct(),
        }
    }
}

/// Accuracy of one model's forecasts for one asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationRow {
    pub asset: String,
    pub model: String,
    #[serde(rename = "abs_err")]
    pub mae: f64,
    pub rmse: f64,
    pub n_forecasts: usize,
    pub reference_vol_pct: f64,
}

/// Evaluation rows, sorted by asset then model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub rows: Vec<EvaluationRow>,
}

impl EvaluationSummary {
    /// Concatenate per-asset summaries, keeping the asset-then-model order.
    pub fn merge<I>(summaries: I) -> Self
    where
        I: IntoIterator<Item = EvaluationSummary>,
    {
        let mut rows: Vec<EvaluationRow> = summaries.into_iter().flat_map(|s| s.rows).collect();
        rows.sort_by(|a, b| (&a.asset, &a.model).cmp(&(&b.asset, &b.model)));
        Self { rows }
    }

    pub fn get(&self, asset: &str, model: &str) -> Option<&EvaluationRow> {
        self.rows.iter().find(|row| row.asset == asset && row.model == model)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Score forecast records against a realized-volatility reference in
/// percent.
///
/// # Errors
/// - [`EvalError::EmptyForecasts`] when `records` is empty.
/// - [`EvalError::NonFiniteReference`] when the reference is NaN or ±∞.
/// - [`EvalError::NonFiniteForecast`] for the first non-finite forecast.
pub fn evaluate_forecasts(
    records: &[ForecastRecord], reference_vol_pct: f64,
) -> EvalResult<EvaluationSummary> {
    if records.is_empty() {
        return Err(EvalError::EmptyForecasts);
    }
    if !reference_vol_pct.is_finite() {
        return Err(EvalError::NonFiniteReference { value: reference_vol_pct });
    }

    // (asset, model) -> (Σ|e|, Σe², count)
    let mut groups: BTreeMap<(&str, &str), (f64, f64, usize)> = BTreeMap::new();
    for record in records {
        let forecast = record.one_day_ahead_vol_forecast_pct;
        if !forecast.is_finite() {
            return Err(EvalError::NonFiniteForecast {
                asset: record.asset.clone(),
                model: record.model.clone(),
                value: forecast,
            });
        }
        let err = forecast - reference_vol_pct;
        let key = (record.asset.as_str(), record.model.as_str());
        let entry = groups.entry(key).or_insert((0.0, 0.0, 0));
        entry.0 += err.abs();
        entry.1 += err * err;
        entry.2 += 1;
    }

    let rows = groups
        .into_iter()
        .map(|((asset, model), (abs_sum, sq_sum, count))| EvaluationRow {
            asset: asset.to_string(),
            model: model.to_string(),
            mae: abs_sum / count as f64,
            rmse: (sq_sum / count as f64).sqrt(),
            n_forecasts: count,
            reference_vol_pct,
        })
        .collect();
    Ok(EvaluationSummary { rows })
}
