//! regime — Gaussian hidden-Markov regime detection.
//!
//! Purpose
//! -------
//! Label each trading day with a latent volatility regime. Features are
//! standardized `(r_t, r_t²)` rows; a `K`-state full-covariance Gaussian HMM
//! is fitted by Baum–Welch from a seeded initial guess, then decoded with
//! forward–backward posteriors and the Viterbi path.
//!
//! Key behaviors
//! -------------
//! - [`detect_regimes`] is the entry point. The EM seed is an explicit
//!   argument; identical seed and input give identical output.
//! - States are relabelled by ascending return volatility so state 0 is the
//!   calmest regime on every run.
//! - Fewer rows than states fails fast; a covariance that cannot be
//!   factorized fails the fit.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every posterior row and every transition row sums to one.
//! - The regime path is aligned 1:1 with the input dates.
//!
//! Testing notes
//! -------------
//! - Each building block is unit-tested in isolation; recovery of a sticky
//!   two-state mixture is an integration test.
pub mod decode;
pub mod em;
pub mod emission;
pub mod errors;
pub mod features;
pub mod forward_backward;
pub mod model;
pub mod options;
pub mod summary;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::series::ReturnSeries;

pub use self::errors::{HmmError, HmmResult};
pub use self::features::FeatureMatrix;
pub use self::model::HmmModel;
pub use self::options::HmmOptions;
pub use self::summary::RegimeSummary;

/// Default EM seed.
pub const DEFAULT_SEED: u64 = 42;

/// Decoded regime at one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegimePoint {
    pub date: NaiveDate,
    pub state: usize,
    pub posterior: Vec<f64>,
}

/// Fitted model, decoded path and per-state summaries for one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegimeAnalysis {
    pub model: HmmModel,
    pub path: Vec<RegimePoint>,
    pub summaries: Vec<RegimeSummary>,
    /// Joint log-probability of the Viterbi path.
    pub viterbi_log_prob: f64,
}

impl RegimeAnalysis {
    pub fn transition_matrix(&self) -> Vec<Vec<f64>> {
        self.model.transition_rows()
    }
}

/// Fit a Gaussian HMM to `series` and decode its regimes.
///
/// # Errors
/// Any [`HmmError`] from feature construction, fitting or decoding.
pub fn detect_regimes(
    series: &ReturnSeries, opts: &HmmOptions, seed: u64,
) -> HmmResult<RegimeAnalysis> {
    opts.validate()?;
    if series.len() < opts.n_states {
        return Err(HmmError::InsufficientData { n: series.len(), states: opts.n_states });
    }
    let features = FeatureMatrix::from_series(series)?;
    debug!(n_obs = features.len(), n_states = opts.n_states, seed, "fitting Gaussian HMM");

    let fitted = em::fit_hmm(&features, opts, seed)?;
    let model = fitted.relabel(&fitted.volatility_order());
    let gamma = decode::posterior_probabilities(&model, &features)?;
    let (states, viterbi_log_prob) = decode::viterbi(&model, &features)?;
    let summaries = summary::summarize_regimes(&model, &states, series.values());
    let path = series
        .dates()
        .iter()
        .zip(&states)
        .zip(gamma.rows())
        .map(|((&date, &state), posterior)| RegimePoint {
            date,
            state,
            posterior: posterior.to_vec(),
        })
        .collect();

    debug!(loglik = model.loglik, iterations = model.iterations, "Gaussian HMM fit complete");
    Ok(RegimeAnalysis { model, path, summaries, viterbi_log_prob })
}
