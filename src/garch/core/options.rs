//! GARCH options — estimation-time configuration.
//!
//! Purpose
//! -------
//! Bundle everything a GARCH-family fit needs beyond the data: the return
//! scaling factor, variance guards, optimizer settings, whether to compute
//! standard errors, and the minimum usable sample length.
//!
//! Invariants & assumptions
//! ------------------------
//! - `scale` is finite and strictly positive.
//! - `min_obs` is at least [`MIN_OBS_FLOOR`].
//! - `mle_opts` and `guards` were validated by their own constructors.
//!
//! Conventions
//! -----------
//! - The default scaling of 100 makes variances percent² and the default
//!   guards `(1e-8, 1e8)` are expressed in those units.
//! - The default optimizer runs L-BFGS (More–Thuente, `tol_grad = 1e-6`,
//!   `tol_cost = 1e-12`, 500 iterations) with a Nelder–Mead fallback.
use crate::{
    garch::{
        core::{
            guards::VarianceGuards,
            validation::{MIN_OBS_FLOOR, validate_scale},
        },
        errors::{GarchError, GarchResult},
    },
    optimization::loglik_optimizer::{
        LineSearcher, MLEOptions, NelderMeadOptions, Tolerances,
    },
};

/// Default multiplier applied to raw returns before estimation.
pub const DEFAULT_SCALE: f64 = 100.0;

/// Default minimum sample length for a GARCH fit.
pub const DEFAULT_MIN_OBS: usize = 100;

/// Estimation-time configuration for GARCH-family fits.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchOptions {
    /// Multiplier applied to returns before estimation.
    pub scale: f64,
    /// Bounds applied to each conditional variance.
    pub guards: VarianceGuards,
    /// Optimizer configuration, including the Nelder–Mead fallback.
    pub mle_opts: MLEOptions,
    /// Compute classical and robust standard errors after the fit.
    pub std_errors: bool,
    /// Minimum number of observations accepted.
    pub min_obs: usize,
}

impl GarchOptions {
    /// Construct validated options.
    ///
    /// # Errors
    /// - [`GarchError::InvalidScale`] for a non-finite or non-positive scale.
    /// - [`GarchError::InvalidMinObservations`] when `min_obs < MIN_OBS_FLOOR`.
    pub fn new(
        scale: f64, guards: VarianceGuards, mle_opts: MLEOptions, std_errors: bool,
        min_obs: usize,
    ) -> GarchResult<Self> {
        validate_scale(scale)?;
        if min_obs < MIN_OBS_FLOOR {
            return Err(GarchError::InvalidMinObservations { value: min_obs, floor: MIN_OBS_FLOOR });
        }
        Ok(Self { scale, guards, mle_opts, std_errors, min_obs })
    }
}

impl Default for GarchOptions {
    fn default() -> Self {
        let mle_opts = MLEOptions {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: Some(1e-12), max_iter: Some(500) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
            fallback: Some(NelderMeadOptions::default()),
        };
        Self {
            scale: DEFAULT_SCALE,
            guards: VarianceGuards::default(),
            mle_opts,
            std_errors: true,
            min_obs: DEFAULT_MIN_OBS,
        }
    }
}
