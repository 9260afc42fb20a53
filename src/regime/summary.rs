//! Per-regime summaries in return units.
//!
//! For each state: share of timesteps assigned by the Viterbi path, mean
//! and standard deviation (population) of the raw returns assigned to it,
//! and the expected regime duration `1 / (1 − A_kk)` in timesteps.
//! States with no assigned timesteps report `None` for the moments.
use serde::Serialize;

use crate::regime::model::HmmModel;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegimeSummary {
    pub state: usize,
    pub occupancy: f64,
    pub mean_return: Option<f64>,
    pub return_volatility: Option<f64>,
    /// Infinite for an absorbing state.
    pub expected_duration: f64,
}

/// Summarize each state from a decoded path and the raw returns.
///
/// # Panics
/// If `path` and `returns` differ in length.
pub fn summarize_regimes(
    model: &HmmModel, path: &[usize], returns: &[f64],
) -> Vec<RegimeSummary> {
    assert_eq!(path.len(), returns.len(), "state path must align with the returns");
    let n = path.len().max(1) as f64;
    (0..model.n_states)
        .map(|state| {
            let assigned: Vec<f64> = path
                .iter()
                .zip(returns)
                .filter(|(s, _)| **s == state)
                .map(|(_, r)| *r)
                .collect();
            let count = assigned.len() as f64;
            let (mean_return, return_volatility) = if assigned.is_empty() {
                (None, None)
            } else {
                let mean = assigned.iter().sum::<f64>() / count;
                let var = assigned.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / count;
                (Some(mean), Some(var.sqrt()))
            };
            let stay = model.transmat[[state, state]];
            RegimeSummary {
                state,
                occupancy: count / n,
                mean_return,
                return_volatility,
                expected_duration: 1.0 / (1.0 - stay),
            }
        })
        .collect()
}
