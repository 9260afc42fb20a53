//! Baum–Welch estimation of a full-covariance Gaussian HMM.
//!
//! Purpose
//! -------
//! Fit `π`, `A` and per-state Gaussians to a standardized feature matrix by
//! expectation–maximization.
//!
//! Key behaviors
//! -------------
//! - Initial guess (seeded `StdRng`): state means from k-means on distinct
//!   randomly chosen rows; every covariance starts at the pooled sample
//!   covariance plus the floor; `π` and `A` start uniform.
//! - Each iteration runs an E-step ([`forward_backward`]), records the
//!   log-likelihood, stops once the improvement falls below `tol`, and
//!   otherwise runs an M-step.
//! - M-step: `π = γ_0`; `A` from row-normalized expected transition counts;
//!   means and covariances from γ-weighted moments, with `cov_floor · I`
//!   added to every covariance. A state with negligible posterior weight
//!   keeps its previous parameters.
//!
//! Invariants & assumptions
//! ------------------------
//! - The loop is bounded by `max_iter`; exhausting it is a convergence
//!   error.
//! - Identical seed and input give identical parameters.
use ndarray::{Array1, Array2, ArrayView1};
use rand::{SeedableRng, rngs::StdRng, seq::index::sample};

use crate::regime::{
    emission::log_emission_matrix,
    errors::{HmmError, HmmResult},
    features::FeatureMatrix,
    forward_backward::{Posteriors, forward_backward},
    model::HmmModel,
    options::HmmOptions,
};

/// Posterior mass below which a state's emission parameters are frozen.
const MIN_STATE_WEIGHT: f64 = 1e-10;

/// Fit a Gaussian HMM by Baum–Welch.
///
/// # Errors
/// - Configuration errors from [`HmmOptions::validate`].
/// - [`HmmError::InsufficientData`] when there are fewer rows than states.
/// - [`HmmError::SingularCovariance`] / [`HmmError::NonFiniteLikelihood`]
///   from the E-step.
/// - [`HmmError::NotConverged`] when `max_iter` E-steps do not meet `tol`.
pub fn fit_hmm(features: &FeatureMatrix, opts: &HmmOptions, seed: u64) -> HmmResult<HmmModel> {
    opts.validate()?;
    let rows = &features.rows;
    let n = rows.nrows();
    let k = opts.n_states;
    if n < k {
        return Err(HmmError::InsufficientData { n, states: k });
    }
    if let Some(index) = rows.rows().into_iter().position(|r| r.iter().any(|v| !v.is_finite())) {
        return Err(HmmError::NonFiniteFeature { index });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let means = kmeans_centers(rows, k, opts.kmeans_iter, &mut rng);
    let pooled = weighted_covariance(rows, None, pooled_mean(rows).view(), opts.cov_floor);
    let mut model = HmmModel {
        n_states: k,
        start_prob: Array1::from_elem(k, 1.0 / k as f64),
        transmat: Array2::from_elem((k, k), 1.0 / k as f64),
        means,
        covars: vec![pooled; k],
        loglik: f64::NEG_INFINITY,
        iterations: 0,
        converged: false,
        history: Vec::with_capacity(opts.max_iter),
    };

    for _ in 0..opts.max_iter {
        let log_b = log_emission_matrix(rows, &model.emissions()?);
        let post = forward_backward(&log_b, &model.start_prob, &model.transmat)?;
        model.history.push(post.loglik);
        model.loglik = post.loglik;
        if let [.., prev, curr] = model.history[..] {
            if curr - prev < opts.tol {
                model.converged = true;
                break;
            }
        }
        m_step(&mut model, rows, &post, opts.cov_floor);
    }
    model.iterations = model.history.len();

    if !model.converged {
        let delta = match model.history[..] {
            [.., prev, curr] => curr - prev,
            _ => f64::NAN,
        };
        return Err(HmmError::NotConverged { iterations: model.iterations, delta });
    }
    Ok(model)
}

// ---- Helper methods ----

fn m_step(model: &mut HmmModel, rows: &Array2<f64>, post: &Posteriors, cov_floor: f64) {
    let k = model.n_states;
    let start_total = post.gamma.row(0).sum();
    if start_total > 0.0 {
        model.start_prob = post.gamma.row(0).mapv(|v| v / start_total);
    }
    for i in 0..k {
        let row_total = post.xi_sum.row(i).sum();
        if row_total > 0.0 {
            for j in 0..k {
                model.transmat[[i, j]] = post.xi_sum[[i, j]] / row_total;
            }
        }
    }
    for state in 0..k {
        let weights = post.gamma.column(state);
        let total = weights.sum();
        if total < MIN_STATE_WEIGHT {
            continue;
        }
        let mean = weights.dot(rows) / total;
        model.covars[state] = weighted_covariance(rows, Some(weights), mean.view(), cov_floor);
        model.means.row_mut(state).assign(&mean);
    }
}

fn pooled_mean(rows: &Array2<f64>) -> Array1<f64> {
    rows.sum_axis(ndarray::Axis(0)) / rows.nrows() as f64
}

/// `Σ_t w_t (x_t − μ)(x_t − μ)ᵀ / Σ_t w_t + floor · I`; unit weights when
/// `weights` is `None`.
fn weighted_covariance(
    rows: &Array2<f64>, weights: Option<ArrayView1<f64>>, mean: ArrayView1<f64>, floor: f64,
) -> Array2<f64> {
    let d = rows.ncols();
    let mut cov = Array2::<f64>::zeros((d, d));
    let mut total = 0.0;
    for (t, x) in rows.rows().into_iter().enumerate() {
        let w = weights.map_or(1.0, |w| w[t]);
        total += w;
        for a in 0..d {
            let da = x[a] - mean[a];
            for b in 0..=a {
                cov[[a, b]] += w * da * (x[b] - mean[b]);
            }
        }
    }
    for a in 0..d {
        for b in 0..=a {
            cov[[a, b]] /= total;
            cov[[b, a]] = cov[[a, b]];
        }
        cov[[a, a]] += floor;
    }
    cov
}

/// Lloyd's k-means seeded with `k` distinct random rows; an empty cluster
/// keeps its previous center.
fn kmeans_centers(rows: &Array2<f64>, k: usize, iters: usize, rng: &mut StdRng) -> Array2<f64> {
    let (n, d) = rows.dim();
    let mut centers = Array2::<f64>::zeros((k, d));
    for (c, idx) in sample(rng, n, k).into_iter().enumerate() {
        centers.row_mut(c).assign(&rows.row(idx));
    }
    let mut labels = vec![0usize; n];
    for _ in 0..iters {
        for (label, x) in labels.iter_mut().zip(rows.rows()) {
            *label = nearest_center(&centers, x);
        }
        let mut sums = Array2::<f64>::zeros((k, d));
        let mut counts = vec![0usize; k];
        for (&label, x) in labels.iter().zip(rows.rows()) {
            let mut s = sums.row_mut(label);
            s += &x;
            counts[label] += 1;
        }
        for (c, &count) in counts.iter().enumerate() {
            if count > 0 {
                let center = sums.row(c).mapv(|v| v / count as f64);
                centers.row_mut(c).assign(&center);
            }
        }
    }
    centers
}

fn nearest_center(centers: &Array2<f64>, x: ArrayView1<f64>) -> usize {
    let mut best = (0, f64::INFINITY);
    for (c, center) in centers.rows().into_iter().enumerate() {
        let dist: f64 = center.iter().zip(x.iter()).map(|(a, b)| (a - b).powi(2)).sum();
        if dist < best.1 {
            best = (c, dist);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::ReturnSeries;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use rand::distributions::Distribution;
    use statrs::distribution::Normal;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Stochastic constraints of the fitted parameters.
    // - Monotone log-likelihood history and determinism under a fixed seed.
    // - Fail-fast paths: too few rows, exhausted iteration budget.
    //
    // Transition recovery on a long regime-switching sample lives in the
    // integration tests.
    // -------------------------------------------------------------------------

    fn switching_features(n: usize, seed: u64) -> FeatureMatrix {
        let normal = Normal::new(0.0, 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let values: Vec<f64> = (0..n)
            .map(|t| {
                let vol = if (t / 100) % 2 == 0 { 0.005 } else { 0.03 };
                vol * normal.sample(&mut rng)
            })
            .collect();
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let dates = (0..n).map(|i| start + chrono::Days::new(i as u64)).collect();
        FeatureMatrix::from_series(&ReturnSeries::new(dates, values).unwrap()).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // A fitted model satisfies the probability constraints and EM improves
    // on the initial guess.
    //
    // Given
    // -----
    // - 600 returns alternating between low and high volatility every 100
    //   days.
    //
    // Expect
    // ------
    // - π and each row of A sum to one; covariances symmetric.
    // - final log-likelihood above the first E-step's.
    fn fit_hmm_produces_stochastic_parameters() {
        // Arrange
        let features = switching_features(600, 7);

        // Act
        let model = fit_hmm(&features, &HmmOptions::default(), 42).expect("EM should converge");

        // Assert
        assert!(model.converged);
        assert_relative_eq!(model.start_prob.sum(), 1.0, epsilon = 1e-9);
        for row in model.transmat.rows() {
            assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-9);
        }
        for cov in &model.covars {
            assert_eq!(cov[[0, 1]], cov[[1, 0]]);
        }
        assert!(model.history[model.history.len() - 1] > model.history[0]);
        assert_eq!(model.loglik, *model.history.last().unwrap());
    }

    #[test]
    fn fit_hmm_is_deterministic_for_a_seed() {
        let features = switching_features(400, 9);
        let a = fit_hmm(&features, &HmmOptions::default(), 42).unwrap();
        let b = fit_hmm(&features, &HmmOptions::default(), 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fit_hmm_rejects_fewer_rows_than_states() {
        let features = switching_features(3, 1);
        let opts = HmmOptions { n_states: 4, ..HmmOptions::default() };
        assert_eq!(
            fit_hmm(&features, &opts, 42).unwrap_err(),
            HmmError::InsufficientData { n: 3, states: 4 }
        );
    }

    #[test]
    // Purpose
    // -------
    // A single EM iteration cannot satisfy the improvement criterion, so the
    // fit reports a convergence error instead of returning parameters.
    fn fit_hmm_reports_exhausted_iteration_budget() {
        let features = switching_features(300, 2);
        let opts = HmmOptions { max_iter: 1, ..HmmOptions::default() };
        let err = fit_hmm(&features, &opts, 42).unwrap_err();
        assert!(matches!(err, HmmError::NotConverged { iterations: 1, .. }));
    }
}
