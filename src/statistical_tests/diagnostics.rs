//! Residual diagnostics bundle for one fitted model.
//!
//! Runs the Ljung–Box test and builds normal QQ pairs on a model's
//! standardized residuals. Both are annotations: the caller decides what to
//! do with them, and nothing here fails a fit.
use serde::{Deserialize, Serialize};

use crate::statistical_tests::{
    errors::{DiagError, DiagResult},
    ljung_box::{DEFAULT_LJUNG_BOX_LAG, LjungBox},
    qq::QQPlot,
};

/// Configuration for residual diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsOptions {
    /// Number of autocorrelations in the Ljung–Box statistic.
    pub ljung_box_lag: usize,
}

impl DiagnosticsOptions {
    /// # Errors
    /// [`DiagError::InvalidLag`] when `ljung_box_lag == 0`.
    pub fn new(ljung_box_lag: usize) -> DiagResult<Self> {
        let opts = Self { ljung_box_lag };
        opts.validate()?;
        Ok(opts)
    }

    /// # Errors
    /// [`DiagError::InvalidLag`] when `ljung_box_lag == 0`.
    pub fn validate(&self) -> DiagResult<()> {
        if self.ljung_box_lag == 0 {
            return Err(DiagError::InvalidLag { lag: 0 });
        }
        Ok(())
    }
}

impl Default for DiagnosticsOptions {
    fn default() -> Self {
        Self { ljung_box_lag: DEFAULT_LJUNG_BOX_LAG }
    }
}

/// Ljung–Box outcome and QQ pairs for one residual series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidualDiagnostics {
    pub ljung_box: LjungBox,
    pub qq: QQPlot,
}

/// Diagnose standardized residuals.
///
/// # Errors
/// Propagates [`DiagError`] from either diagnostic.
pub fn diagnose_residuals(
    std_residuals: &[f64], opts: &DiagnosticsOptions,
) -> DiagResult<ResidualDiagnostics> {
    let ljung_box = LjungBox::ljung_box(std_residuals, opts.ljung_box_lag)?;
    let qq = QQPlot::normal(std_residuals)?;
    Ok(ResidualDiagnostics { ljung_box, qq })
}
