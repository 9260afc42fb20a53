//! Per-asset analysis reports.
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    errors::ErrorKind,
    evaluation::{EvaluationSummary, ForecastRecord, RealizedVolPoint},
    garch::{GarchFit, GarchVariant},
    regime::RegimeAnalysis,
    statistical_tests::ResidualDiagnostics,
};

/// Component whose failure is recorded in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Component {
    Garch(GarchVariant),
    Diagnostics(GarchVariant),
    Regime,
    Evaluation,
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Component::Garch(variant) => write!(f, "{variant}"),
            Component::Diagnostics(variant) => write!(f, "{variant} diagnostics"),
            Component::Regime => f.write_str("HMM"),
            Component::Evaluation => f.write_str("evaluation"),
        }
    }
}

/// A recoverable failure of one component of an asset analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitFailure {
    pub asset: String,
    pub component: Component,
    pub kind: ErrorKind,
    pub message: String,
}

/// Residual diagnostics of one fitted variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDiagnostics {
    pub model: GarchVariant,
    #[serde(flatten)]
    pub diagnostics: ResidualDiagnostics,
}

/// Everything computed for one asset.
///
/// Components that failed are absent from their collection (or `None`) and
/// listed in `failures`; results that depend on a failed fit are skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetReport {
    pub asset: String,
    pub n_obs: usize,
    pub last_date: NaiveDate,
    /// Successful GARCH-family fits in configuration order.
    pub fits: Vec<GarchFit>,
    pub diagnostics: Vec<ModelDiagnostics>,
    pub forecasts: Vec<ForecastRecord>,
    pub regime: Option<RegimeAnalysis>,
    /// Rolling realized volatility in percent, aligned with the series.
    pub realized: Vec<RealizedVolPoint>,
    /// Most recent realized volatility, the evaluation reference.
    pub realized_anchor_pct: f64,
    pub evaluation: Option<EvaluationSummary>,
    pub failures: Vec<FitFailure>,
}

impl AssetReport {
    pub fn fit(&self, variant: GarchVariant) -> Option<&GarchFit> {
        self.fits.iter().find(|fit| fit.variant == variant)
    }

    pub fn diagnostics_for(&self, variant: GarchVariant) -> Option<&ResidualDiagnostics> {
        self.diagnostics.iter().find(|d| d.model == variant).map(|d| &d.diagnostics)
    }

    /// `true` when no component failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Reports for several assets plus their pooled evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioReport {
    pub reports: Vec<AssetReport>,
    pub evaluation: EvaluationSummary,
}

impl PortfolioReport {
    pub fn report(&self, asset: &str) -> Option<&AssetReport> {
        self.reports.iter().find(|report| report.asset == asset)
    }

    /// Failures of every asset, in asset order.
    pub fn failures(&self) -> impl Iterator<Item = &FitFailure> + '_ {
        self.reports.iter().flat_map(|report| report.failures.iter())
    }
}
