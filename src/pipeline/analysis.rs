//! analysis — orchestration of one or more asset analyses.
//!
//! Purpose
//! -------
//! Run every estimator of the crate on a return series and collect their
//! outputs in an [`AssetReport`]: the configured GARCH-family fits with
//! residual diagnostics and one-step forecasts, the regime analysis, the
//! realized-volatility path and the forecast evaluation.
//!
//! Key behaviors
//! -------------
//! - Configuration and data problems abort the analysis before or during
//!   the fits; nothing partial is returned.
//! - Convergence and numerical failures are recorded as [`FitFailure`]s and
//!   the remaining components carry on. Results that depend on a failed fit
//!   (its diagnostics and forecast) are skipped.
//! - The GARCH variants and the HMM fit run concurrently on the rayon pool;
//!   [`analyze_assets`] additionally runs assets in parallel. Inputs are
//!   shared read-only and each fit owns its scratch state.
//!
//! Conventions
//! -----------
//! - Fits, diagnostics and forecasts follow the configured variant order.
//! - Recorded failures are logged with `warn!`; completed analyses with
//!   `info!`.
use std::fmt::Display;

use rayon::prelude::*;
use tracing::{info, info_span, warn};

use crate::{
    evaluation::{
        EvaluationSummary, ForecastRecord, evaluate_forecasts, realized_vol_anchor_pct,
        realized_volatility_path,
    },
    garch::{GarchOptions, fit_garch},
    pipeline::{
        config::AnalysisConfig,
        errors::{PipelineError, PipelineResult},
        report::{AssetReport, Component, FitFailure, ModelDiagnostics, PortfolioReport},
    },
    regime::detect_regimes,
    series::ReturnSeries,
    statistical_tests::{diagnose_residuals, validation::validate_lagged_input},
};

/// Analyze one asset.
///
/// # Errors
/// - Configuration errors from [`AnalysisConfig::validate`].
/// - Data errors: a series no longer than the Ljung–Box lag, shorter than
///   the realized-volatility window or the GARCH minimum length, or with
///   degenerate HMM features.
///
/// Convergence and numerical failures are reported in
/// [`AssetReport::failures`] instead.
pub fn analyze_asset(
    asset: &str, series: &ReturnSeries, config: &AnalysisConfig,
) -> PipelineResult<AssetReport> {
    config.validate()?;
    let garch_opts = config.garch.to_options()?;
    run_asset(asset, series, config, &garch_opts)
}

/// Analyze several named assets in parallel and pool their evaluations.
///
/// # Errors
/// - [`PipelineError::DuplicateAsset`] when a name repeats.
/// - The first aborting error of any asset, as in [`analyze_asset`].
pub fn analyze_assets(
    assets: &[(String, ReturnSeries)], config: &AnalysisConfig,
) -> PipelineResult<PortfolioReport> {
    config.validate()?;
    for (i, (name, _)) in assets.iter().enumerate() {
        if assets[..i].iter().any(|(other, _)| other == name) {
            return Err(PipelineError::DuplicateAsset { name: name.clone() });
        }
    }
    let garch_opts = config.garch.to_options()?;

    let reports = assets
        .par_iter()
        .map(|(name, series)| run_asset(name, series, config, &garch_opts))
        .collect::<PipelineResult<Vec<_>>>()?;
    let evaluation =
        EvaluationSummary::merge(reports.iter().filter_map(|report| report.evaluation.clone()));

    info!(
        assets = reports.len(),
        failures = reports.iter().map(|r| r.failures.len()).sum::<usize>(),
        "portfolio analysis complete"
    );
    Ok(PortfolioReport { reports, evaluation })
}

// ---- Helper methods ----

fn run_asset(
    asset: &str, series: &ReturnSeries, config: &AnalysisConfig, garch_opts: &GarchOptions,
) -> PipelineResult<AssetReport> {
    let _span = info_span!("analyze_asset", asset).entered();
    let window = config.evaluation.realized_window;
    validate_lagged_input(series.values(), config.diagnostics.ljung_box_lag)?;
    let realized = realized_volatility_path(series, window)?;
    let realized_anchor_pct = realized_vol_anchor_pct(series.values(), window)?;

    let (garch_results, regime_result) = rayon::join(
        || {
            config
                .variants
                .par_iter()
                .map(|&variant| (variant, fit_garch(variant, series, garch_opts)))
                .collect::<Vec<_>>()
        },
        || detect_regimes(series, &config.hmm, config.hmm_seed),
    );

    let mut failures = Vec::new();
    let mut fits = Vec::with_capacity(garch_results.len());
    for (variant, result) in garch_results {
        if let Some(fit) = recover(result, asset, Component::Garch(variant), &mut failures)? {
            fits.push(fit);
        }
    }
    let regime = recover(regime_result, asset, Component::Regime, &mut failures)?;

    let mut diagnostics = Vec::with_capacity(fits.len());
    for fit in &fits {
        let result = diagnose_residuals(&fit.std_residuals, &config.diagnostics);
        let component = Component::Diagnostics(fit.variant);
        if let Some(diag) = recover(result, asset, component, &mut failures)? {
            diagnostics.push(ModelDiagnostics { model: fit.variant, diagnostics: diag });
        }
    }

    let forecasts: Vec<ForecastRecord> =
        fits.iter().map(|fit| ForecastRecord::from_fit(asset, fit)).collect();
    let evaluation = if forecasts.is_empty() {
        None
    } else {
        let result = evaluate_forecasts(&forecasts, realized_anchor_pct);
        recover(result, asset, Component::Evaluation, &mut failures)?
    };

    info!(
        asset,
        fits = fits.len(),
        regime = regime.is_some(),
        failures = failures.len(),
        "asset analysis complete"
    );
    Ok(AssetReport {
        asset: asset.to_string(),
        n_obs: series.len(),
        last_date: series.last_date(),
        fits,
        diagnostics,
        forecasts,
        regime,
        realized,
        realized_anchor_pct,
        evaluation,
        failures,
    })
}

/// Pass a successful result through, record a recoverable failure, or
/// abort on anything else.
fn recover<T, E>(
    result: Result<T, E>, asset: &str, component: Component, failures: &mut Vec<FitFailure>,
) -> PipelineResult<Option<T>>
where
    E: Into<PipelineError> + Display,
{
    let err = match result {
        Ok(value) => return Ok(Some(value)),
        Err(err) => err,
    };
    let message = err.to_string();
    let err: PipelineError = err.into();
    let kind = err.kind();
    if !kind.is_recoverable() {
        return Err(err);
    }
    warn!(asset, %component, %kind, %message, "component failed, continuing without it");
    failures.push(FitFailure { asset: asset.to_string(), component, kind, message });
    Ok(None)
}
