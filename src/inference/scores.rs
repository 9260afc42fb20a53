//! inference::scores — score covariance for sandwich standard errors.
//!
//! Builds the outer-product-of-gradients matrix `S = (1/n) Σ_t s_t s_tᵀ`
//! from an `n × p` matrix of per-observation scores. This is the middle
//! term of the Bollerslev–Wooldridge sandwich `J⁻¹ S J⁻¹`.
use ndarray::Array2;

use crate::inference::errors::{InferenceError, InferenceResult};

/// Average outer product of per-observation scores, `(1/n) SᵀS`.
///
/// Rows are observations, columns are parameters. Scores are not centered:
/// at an interior maximum their mean is already ≈ 0.
///
/// # Errors
/// - [`InferenceError::EmptyScores`] if `scores` has no rows.
/// - [`InferenceError::ScoreDimMismatch`] if the column count differs from
///   `dim`.
pub fn outer_product_of_scores(scores: &Array2<f64>, dim: usize) -> InferenceResult<Array2<f64>> {
    let n = scores.nrows();
    if n == 0 {
        return Err(InferenceError::EmptyScores);
    }
    if scores.ncols() != dim {
        return Err(InferenceError::ScoreDimMismatch { expected: dim, found: scores.ncols() });
    }
    Ok(scores.t().dot(scores) / n as f64)
}
