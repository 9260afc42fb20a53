//! pipeline — end-to-end volatility and regime analysis of return series.
//!
//! Purpose
//! -------
//! Tie the estimators together for collaborators that want one call per
//! asset: [`analyze_asset`] fits the configured GARCH-family variants,
//! diagnoses their residuals, forecasts one step ahead, detects volatility
//! regimes and scores the forecasts against realized volatility.
//!
//! Key behaviors
//! -------------
//! - [`AnalysisConfig`] carries every setting and loads from JSON.
//! - Recoverable failures become [`FitFailure`] entries of the report;
//!   everything else is a [`PipelineError`].
//! - Estimation returns plain serializable data. Writing CSV, JSON or plots
//!   is left to the caller.

pub mod analysis;
pub mod config;
pub mod errors;
pub mod report;

pub use self::analysis::{analyze_asset, analyze_assets};
pub use self::config::{AnalysisConfig, GarchSettings};
pub use self::errors::{PipelineError, PipelineResult};
pub use self::report::{AssetReport, Component, FitFailure, ModelDiagnostics, PortfolioReport};
