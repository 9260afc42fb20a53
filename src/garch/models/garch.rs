//! GARCH-family estimation: likelihood adapter, fit, and fitted results.
//!
//! [`GarchModel`] wires one variant's recursion to the [`LogLikelihood`]
//! trait. It evaluates the mean Gaussian log-likelihood in optimizer
//! coordinates `θ` and reuses a scratch buffer for the variance path, so an
//! objective evaluation allocates nothing.
//!
//! [`fit_garch`] is the entry point: it validates and scales the input,
//! maximizes the likelihood from moment-matched starting values, checks
//! convergence and stationarity, then rebuilds the in-sample path at the
//! optimum and packages a [`GarchFit`].
//!
//! Key ideas:
//! - Parameter points that produce a non-finite variance or likelihood are
//!   rejected with a large finite penalty rather than aborting the search.
//! - Standard errors are computed in natural coordinates `(μ, ω, α, [γ,] β)`
//!   from the same recursion; a failure there leaves `std_errors` empty and
//!   never fails the fit.
use std::cell::RefCell;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::{
    errors::ErrorKind,
    garch::{
        core::{
            data::GarchData,
            forecasts::{TerminalState, one_step_variance, variance_to_vol_pct},
            guards::VarianceGuards,
            init::initial_theta,
            options::GarchOptions,
            params::GarchParams,
            recursion::{fill_variance_path, loglik_contributions, mean_loglik},
            validation::validate_theta,
            variant::GarchVariant,
        },
        errors::{GarchError, GarchResult},
    },
    inference::{StandardErrors, standard_errors},
    optimization::{
        errors::OptResult,
        loglik_optimizer::{LogLikelihood, SolverKind, Theta, maximize},
    },
    series::ReturnSeries,
};

/// Mean log-likelihood assigned to rejected parameter points.
const REJECTED_POINT_LOGLIK: f64 = -1e10;

/// Likelihood adapter for one GARCH-family variant.
#[derive(Debug, Clone)]
pub struct GarchModel {
    pub variant: GarchVariant,
    pub guards: VarianceGuards,
    scratch: RefCell<Vec<f64>>,
}

impl GarchModel {
    /// Create a model whose scratch buffer holds `n` variances.
    pub fn new(variant: GarchVariant, guards: VarianceGuards, n: usize) -> Self {
        Self { variant, guards, scratch: RefCell::new(vec![0.0; n]) }
    }
}

impl LogLikelihood for GarchModel {
    type Data = GarchData;

    /// Mean log-likelihood `(1/n) Σ_t ℓ_t` at optimizer coordinates `θ`.
    ///
    /// # Errors
    /// Returns an error for a malformed `θ`; numerical failures of the
    /// recursion are penalized instead.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let params = GarchParams::from_theta(self.variant, theta.view())?;
        let mut scratch = self.scratch.borrow_mut();
        if scratch.len() != data.len() {
            scratch.resize(data.len(), 0.0);
        }
        match mean_loglik(self.variant, &params, data, &self.guards, &mut scratch) {
            Ok(value) => Ok(value),
            Err(err) if err.kind() == ErrorKind::Numerical => Ok(REJECTED_POINT_LOGLIK),
            Err(err) => Err(err.into()),
        }
    }

    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), self.variant)?;
        Ok(())
    }
}

/// Conditional volatility at one date, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolatilityPoint {
    pub date: NaiveDate,
    pub volatility_pct: f64,
}

/// Result of one GARCH-family fit.
///
/// Variances, residuals and parameters are in scaled units (percent with the
/// default scale); `path` and forecasts are reported in percent regardless
/// of the scale used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GarchFit {
    #[serde(rename = "model")]
    pub variant: GarchVariant,
    pub params: GarchParams,
    /// Standard errors aligned with `(μ, ω, α, [γ,] β)`.
    pub std_errors: Option<StandardErrors>,
    pub loglik: f64,
    pub aic: f64,
    pub bic: f64,
    pub n_obs: usize,
    pub iterations: usize,
    pub status: String,
    pub solver: SolverKind,
    pub path: Vec<VolatilityPoint>,
    pub std_residuals: Vec<f64>,
    pub terminal: TerminalState,
    pub scale: f64,
    pub last_date: NaiveDate,
    #[serde(skip)]
    pub guards: VarianceGuards,
}

impl GarchFit {
    /// One-step-ahead conditional variance in scaled units.
    pub fn forecast_variance(&self) -> f64 {
        one_step_variance(self.variant, &self.params, &self.terminal, &self.guards)
    }

    /// One-step-ahead volatility in percent.
    pub fn forecast_volatility_pct(&self) -> f64 {
        variance_to_vol_pct(self.forecast_variance(), self.scale)
    }
}

/// Fit one GARCH-family variant by maximum likelihood.
///
/// # Steps
/// 1. Scale and validate the returns ([`GarchData::new`]).
/// 2. Maximize the mean log-likelihood from moment-matched starting values.
/// 3. Reject non-converged and non-stationary estimates.
/// 4. Rebuild the variance path, standardized residuals and terminal state
///    at the optimum; compute AIC/BIC and, optionally, standard errors.
///
/// # Errors
/// - Data and configuration errors from validation.
/// - [`GarchError::NotConverged`] when the optimizer stops without meeting
///   its tolerances.
/// - [`GarchError::NonStationary`] when the persistence is not below one.
/// - [`GarchError::Optimization`] for hard solver failures.
pub fn fit_garch(
    variant: GarchVariant, series: &ReturnSeries, opts: &GarchOptions,
) -> GarchResult<GarchFit> {
    let data = GarchData::new(series, opts.scale, opts.min_obs)?;
    let n = data.len();
    debug!(model = %variant, n_obs = n, scale = opts.scale, "fitting GARCH-family model");

    let model = GarchModel::new(variant, opts.guards, n);
    let outcome = maximize(&model, initial_theta(variant, &data), &data, &opts.mle_opts)?;
    if !outcome.converged {
        return Err(GarchError::NotConverged {
            variant,
            iterations: outcome.iterations,
            status: outcome.status,
        });
    }

    let params = GarchParams::from_theta(variant, outcome.theta_hat.view())?;
    let persistence = params.persistence(variant);
    if persistence.is_nan() || persistence >= 1.0 {
        return Err(GarchError::NonStationary { variant, persistence });
    }

    let mut variance = vec![0.0; n];
    fill_variance_path(variant, &params, &data, &opts.guards, &mut variance)?;
    let residuals: Vec<f64> = data.returns.iter().map(|r| r - params.mu).collect();
    let std_residuals = residuals.iter().zip(&variance).map(|(e, v)| e / v.sqrt()).collect();
    let path = series
        .dates()
        .iter()
        .zip(&variance)
        .map(|(&date, &v)| VolatilityPoint {
            date,
            volatility_pct: variance_to_vol_pct(v, opts.scale),
        })
        .collect();

    let loglik = outcome.value * n as f64;
    let k = variant.n_params() as f64;
    let std_errors = if opts.std_errors {
        natural_std_errors(variant, &params, &data, &opts.guards)
    } else {
        None
    };

    debug!(
        model = %variant,
        loglik,
        iterations = outcome.iterations,
        solver = %outcome.solver,
        persistence,
        "GARCH-family fit complete"
    );

    Ok(GarchFit {
        variant,
        params,
        std_errors,
        loglik,
        aic: 2.0 * k - 2.0 * loglik,
        bic: k * (n as f64).ln() - 2.0 * loglik,
        n_obs: n,
        iterations: outcome.iterations,
        status: outcome.status,
        solver: outcome.solver,
        path,
        std_residuals,
        terminal: TerminalState { last_residual: residuals[n - 1], last_variance: variance[n - 1] },
        scale: opts.scale,
        last_date: series.last_date(),
        guards: opts.guards,
    })
}

// ---- Helper methods ----

/// Standard errors in natural coordinates; `None` when curvature or scores
/// cannot be evaluated.
fn natural_std_errors(
    variant: GarchVariant, params: &GarchParams, data: &GarchData, guards: &VarianceGuards,
) -> Option<StandardErrors> {
    let mean = |phi: &Theta| -> OptResult<f64> {
        let p = GarchParams::from_natural(variant, phi.view())?;
        let mut scratch = vec![0.0; data.len()];
        Ok(mean_loglik(variant, &p, data, guards, &mut scratch)?)
    };
    let obs = |phi: &Theta| -> OptResult<ndarray::Array1<f64>> {
        let p = GarchParams::from_natural(variant, phi.view())?;
        Ok(loglik_contributions(variant, &p, data, guards)?)
    };
    match standard_errors(mean, obs, &params.to_natural(variant)) {
        Ok(se) => Some(se),
        Err(err) => {
            debug!(model = %variant, error = %err, "standard errors unavailable");
            None
        }
    }
}
