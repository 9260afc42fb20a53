//! Scaled forward–backward recursions.
//!
//! Purpose
//! -------
//! Compute state posteriors `γ_t(k)`, summed pairwise posteriors
//! `Σ_t ξ_t(i, j)`, and the sequence log-likelihood for a Gaussian HMM.
//!
//! Key behaviors
//! -------------
//! - Emission log densities are shifted by their row maximum before
//!   exponentiation, so no row underflows to zero.
//! - Forward variables are normalized at every step; the normalizers `c_t`
//!   give `ln p(x) = Σ_t (ln c_t + m_t)` with `m_t` the row shift.
//! - Backward variables reuse the same normalizers, so `γ_t = α̂_t ∘ β̂_t`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `start_prob` and the rows of `transmat` are probability vectors.
//! - Every `γ_t` row sums to one up to rounding.
use ndarray::{Array1, Array2};

use crate::regime::errors::{HmmError, HmmResult};

/// Output of one forward–backward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Posteriors {
    /// `n × K` state posteriors.
    pub gamma: Array2<f64>,
    /// `K × K` expected transition counts `Σ_t ξ_t(i, j)`.
    pub xi_sum: Array2<f64>,
    pub loglik: f64,
}

/// Run the scaled forward–backward recursions.
///
/// # Errors
/// [`HmmError::NonFiniteLikelihood`] when a forward normalizer is zero or
/// not finite (every state assigns zero probability to an observation).
pub fn forward_backward(
    log_b: &Array2<f64>, start_prob: &Array1<f64>, transmat: &Array2<f64>,
) -> HmmResult<Posteriors> {
    let (n, k) = log_b.dim();
    let mut b = Array2::<f64>::zeros((n, k));
    let mut shift = Array1::<f64>::zeros(n);
    for t in 0..n {
        let m = log_b.row(t).fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        if !m.is_finite() {
            return Err(HmmError::NonFiniteLikelihood { value: m });
        }
        shift[t] = m;
        for j in 0..k {
            b[[t, j]] = (log_b[[t, j]] - m).exp();
        }
    }

    // ---- Forward ----
    let mut alpha = Array2::<f64>::zeros((n, k));
    let mut scale = Array1::<f64>::zeros(n);
    let mut loglik = 0.0;
    for t in 0..n {
        for j in 0..k {
            let prior = if t == 0 {
                start_prob[j]
            } else {
                (0..k).map(|i| alpha[[t - 1, i]] * transmat[[i, j]]).sum()
            };
            alpha[[t, j]] = prior * b[[t, j]];
        }
        let c: f64 = alpha.row(t).sum();
        if !(c.is_finite() && c > 0.0) {
            return Err(HmmError::NonFiniteLikelihood { value: c.ln() + shift[t] });
        }
        alpha.row_mut(t).mapv_inplace(|v| v / c);
        scale[t] = c;
        loglik += c.ln() + shift[t];
    }

    // ---- Backward ----
    let mut beta = Array2::<f64>::ones((n, k));
    let mut xi_sum = Array2::<f64>::zeros((k, k));
    for t in (0..n.saturating_sub(1)).rev() {
        for i in 0..k {
            let mut acc = 0.0;
            for j in 0..k {
                let w = transmat[[i, j]] * b[[t + 1, j]] * beta[[t + 1, j]] / scale[t + 1];
                acc += w;
                xi_sum[[i, j]] += alpha[[t, i]] * w;
            }
            beta[[t, i]] = acc;
        }
    }

    let mut gamma = alpha * &beta;
    for mut row in gamma.rows_mut() {
        let total = row.sum();
        if total > 0.0 {
            row.mapv_inplace(|v| v / total);
        }
    }
    Ok(Posteriors { gamma, xi_sum, loglik })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the scaled log-likelihood with brute-force enumeration.
    // - Normalization of posteriors and transition counts.
    // - Robustness to very negative log densities.
    // -------------------------------------------------------------------------

    fn setup() -> (Array2<f64>, Array1<f64>, Array2<f64>) {
        let b = array![[0.5, 0.1], [0.2, 0.4], [0.3, 0.3]];
        (b.mapv(f64::ln), array![0.6, 0.4], array![[0.7, 0.3], [0.4, 0.6]])
    }

    #[test]
    // Purpose
    // -------
    // The log-likelihood equals the sum over all 2³ state paths.
    //
    // Given
    // -----
    // - Three observations, two states, explicit emission probabilities.
    //
    // Expect
    // ------
    // - `loglik` = ln Σ_paths π_{s0} b_0(s0) Π A b.
    fn forward_backward_matches_path_enumeration() {
        // Arrange
        let (log_b, pi, a) = setup();
        let b = log_b.mapv(f64::exp);
        let mut total = 0.0;
        for s0 in 0..2 {
            for s1 in 0..2 {
                for s2 in 0..2 {
                    total += pi[s0]
                        * b[[0, s0]]
                        * a[[s0, s1]]
                        * b[[1, s1]]
                        * a[[s1, s2]]
                        * b[[2, s2]];
                }
            }
        }

        // Act
        let post = forward_backward(&log_b, &pi, &a).unwrap();

        // Assert
        assert_relative_eq!(post.loglik, total.ln(), epsilon = 1e-12);
        for row in post.gamma.rows() {
            assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-12);
        }
        assert_relative_eq!(post.xi_sum.sum(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn forward_backward_survives_tiny_densities() {
        let (log_b, pi, a) = setup();
        let shifted = log_b.mapv(|v| v - 2000.0);
        let base = forward_backward(&log_b, &pi, &a).unwrap();
        let post = forward_backward(&shifted, &pi, &a).unwrap();
        assert_relative_eq!(post.loglik, base.loglik - 6000.0, epsilon = 1e-9);
        for (a, b) in post.gamma.iter().zip(base.gamma.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn forward_backward_rejects_impossible_observation() {
        let (mut log_b, pi, a) = setup();
        log_b[[1, 0]] = f64::NEG_INFINITY;
        log_b[[1, 1]] = f64::NEG_INFINITY;
        assert!(matches!(
            forward_backward(&log_b, &pi, &a),
            Err(HmmError::NonFiniteLikelihood { .. })
        ));
    }
}
