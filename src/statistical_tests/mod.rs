//! statistical_tests — residual diagnostics for fitted volatility models.
//!
//! Purpose
//! -------
//! Check whether standardized residuals `z_t = ε_t / σ_t` look like
//! independent standard-normal draws, as the Gaussian likelihood assumes.
//!
//! Key behaviors
//! -------------
//! - [`LjungBox`]: portmanteau test for remaining autocorrelation, with an
//!   asymptotic χ²(L) p-value.
//! - [`QQPlot`]: sorted residuals paired with standard-normal quantiles,
//!   plus a least-squares reference line.
//! - [`diagnose_residuals`]: both of the above with [`DiagnosticsOptions`].
//! - Input guards live in [`validation`] and are shared by every test.
//!
//! Invariants & assumptions
//! ------------------------
//! - Routines never panic on user input; failures are [`DiagError`] values.
//! - Diagnostics annotate a fit. The orchestration layer skips them when the
//!   fit failed instead of defaulting them to zero.
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests for its error branches and at least one
//!   hand-computed reference value.

pub mod diagnostics;
pub mod errors;
pub mod ljung_box;
pub mod qq;
pub mod validation;

pub use self::diagnostics::{DiagnosticsOptions, ResidualDiagnostics, diagnose_residuals};
pub use self::errors::{DiagError, DiagResult};
pub use self::ljung_box::LjungBox;
pub use self::qq::{QQPlot, QQPoint};
