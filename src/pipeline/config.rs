//! config — serde-loadable configuration for a full analysis.
//!
//! Purpose
//! -------
//! Bundle every knob of the pipeline in one value that collaborators can
//! build in code or load from JSON: the GARCH variants to fit and their
//! estimation settings, the HMM options and seed, the Ljung–Box lag and the
//! realized-volatility window.
//!
//! Key behaviors
//! -------------
//! - Every field has a default; a JSON document only lists overrides.
//! - [`AnalysisConfig::from_json_str`] parses, then validates. Parse
//!   failures (including unknown variant names) are configuration errors.
//! - [`GarchSettings::to_options`] runs the fallible GARCH option
//!   constructors, so invalid scales, guards or tolerances are caught in
//!   [`AnalysisConfig::validate`] before any fit starts.
//!
//! Conventions
//! -----------
//! - Defaults: variants {GARCH11, EGARCH, GJRGARCH}, scale ×100, L-BFGS
//!   with More–Thuente and a Nelder–Mead fallback, 2 HMM states, 200 EM
//!   iterations, seed 42, Ljung–Box lag 10, realized window 5.
use serde::{Deserialize, Serialize};

use crate::{
    evaluation::EvaluationOptions,
    garch::{
        GarchOptions, GarchVariant, VarianceGuards,
        core::options::{DEFAULT_MIN_OBS, DEFAULT_SCALE},
    },
    optimization::loglik_optimizer::{LineSearcher, MLEOptions, NelderMeadOptions, Tolerances},
    pipeline::errors::{PipelineError, PipelineResult},
    regime::{DEFAULT_SEED, HmmOptions},
    statistical_tests::DiagnosticsOptions,
};

/// Serializable GARCH estimation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GarchSettings {
    /// Multiplier applied to returns before estimation.
    pub scale: f64,
    /// `(min, max)` bounds on the conditional variance, in scaled units.
    pub variance_bounds: (f64, f64),
    pub max_iter: usize,
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    /// `"MoreThuente"` or `"HagerZhang"`.
    pub line_searcher: String,
    pub lbfgs_mem: Option<usize>,
    /// Retry with Nelder–Mead when L-BFGS fails.
    pub nelder_mead_fallback: bool,
    pub std_errors: bool,
    pub min_obs: usize,
}

impl GarchSettings {
    /// Build validated [`GarchOptions`].
    ///
    /// # Errors
    /// Optimizer and GARCH option errors for invalid values.
    pub fn to_options(&self) -> PipelineResult<GarchOptions> {
        let tols = Tolerances::new(self.tol_grad, self.tol_cost, Some(self.max_iter))?;
        let line_searcher: LineSearcher = self.line_searcher.parse()?;
        let mut mle_opts = MLEOptions::new(tols, line_searcher, false, self.lbfgs_mem)?;
        if self.nelder_mead_fallback {
            mle_opts = mle_opts.with_fallback(NelderMeadOptions::default());
        }
        let guards = VarianceGuards::new(self.variance_bounds)?;
        Ok(GarchOptions::new(self.scale, guards, mle_opts, self.std_errors, self.min_obs)?)
    }
}

impl Default for GarchSettings {
    fn default() -> Self {
        let guards = VarianceGuards::default();
        Self {
            scale: DEFAULT_SCALE,
            variance_bounds: (guards.min, guards.max),
            max_iter: 500,
            tol_grad: Some(1e-6),
            tol_cost: Some(1e-12),
            line_searcher: "MoreThuente".to_string(),
            lbfgs_mem: None,
            nelder_mead_fallback: true,
            std_errors: true,
            min_obs: DEFAULT_MIN_OBS,
        }
    }
}

/// Full configuration of an asset analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// GARCH-family variants to fit, in reporting order.
    pub variants: Vec<GarchVariant>,
    pub garch: GarchSettings,
    pub hmm: HmmOptions,
    /// Seed of the EM initial guess.
    pub hmm_seed: u64,
    pub diagnostics: DiagnosticsOptions,
    pub evaluation: EvaluationOptions,
}

impl AnalysisConfig {
    /// Parse a JSON document and validate it.
    ///
    /// # Errors
    /// - [`PipelineError::InvalidConfig`] when the document does not parse.
    /// - Any error from [`AnalysisConfig::validate`].
    pub fn from_json_str(json: &str) -> PipelineResult<Self> {
        let config: AnalysisConfig = serde_json::from_str(json)
            .map_err(|err| PipelineError::InvalidConfig { reason: err.to_string() })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section.
    ///
    /// # Errors
    /// - [`PipelineError::NoVariants`] / [`PipelineError::DuplicateVariant`]
    ///   for an empty or repeated variant selection.
    /// - Configuration errors from the GARCH, HMM, diagnostics and
    ///   evaluation options.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.variants.is_empty() {
            return Err(PipelineError::NoVariants);
        }
        for (i, variant) in self.variants.iter().enumerate() {
            if self.variants[..i].contains(variant) {
                return Err(PipelineError::DuplicateVariant { name: variant.name().to_string() });
            }
        }
        self.garch.to_options()?;
        self.hmm.validate()?;
        self.diagnostics.validate()?;
        self.evaluation.validate()?;
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            variants: GarchVariant::ALL.to_vec(),
            garch: GarchSettings::default(),
            hmm: HmmOptions::default(),
            hmm_seed: DEFAULT_SEED,
            diagnostics: DiagnosticsOptions::default(),
            evaluation: EvaluationOptions::default(),
        }
    }
}
