//! State decoding for a fitted HMM.
//!
//! - [`posterior_probabilities`]: per-timestep `γ_t` from forward–backward.
//! - [`viterbi`]: most likely state sequence, computed in log space so long
//!   samples never underflow.
use ndarray::Array2;

use crate::regime::{
    emission::log_emission_matrix, errors::HmmResult, features::FeatureMatrix,
    forward_backward::forward_backward, model::HmmModel,
};

/// `n × K` posterior state probabilities.
///
/// # Errors
/// Emission or forward–backward failures.
pub fn posterior_probabilities(
    model: &HmmModel, features: &FeatureMatrix,
) -> HmmResult<Array2<f64>> {
    let log_b = log_emission_matrix(&features.rows, &model.emissions()?);
    Ok(forward_backward(&log_b, &model.start_prob, &model.transmat)?.gamma)
}

/// Most likely state path and its joint log-probability.
///
/// # Errors
/// Emission failures.
pub fn viterbi(model: &HmmModel, features: &FeatureMatrix) -> HmmResult<(Vec<usize>, f64)> {
    let log_b = log_emission_matrix(&features.rows, &model.emissions()?);
    let (n, k) = log_b.dim();
    if n == 0 {
        return Ok((Vec::new(), 0.0));
    }
    let log_a = model.transmat.mapv(f64::ln);
    let mut delta = Array2::<f64>::from_elem((n, k), f64::NEG_INFINITY);
    let mut backptr = Array2::<usize>::zeros((n, k));
    for j in 0..k {
        delta[[0, j]] = model.start_prob[j].ln() + log_b[[0, j]];
    }
    for t in 1..n {
        for j in 0..k {
            let (best_i, best) =
                argmax((0..k).map(|i| (i, delta[[t - 1, i]] + log_a[[i, j]])));
            delta[[t, j]] = best + log_b[[t, j]];
            backptr[[t, j]] = best_i;
        }
    }

    let (mut state, log_prob) = argmax((0..k).map(|j| (j, delta[[n - 1, j]])));
    let mut path = vec![0; n];
    for t in (0..n).rev() {
        path[t] = state;
        state = backptr[[t, state]];
    }
    Ok((path, log_prob))
}

/// First index with the largest value; `(0, −∞)` when all are `−∞`.
fn argmax(candidates: impl Iterator<Item = (usize, f64)>) -> (usize, f64) {
    candidates.fold((0, f64::NEG_INFINITY), |acc, cand| if cand.1 > acc.1 { cand } else { acc })
}
