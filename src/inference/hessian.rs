//! inference::hessian — observed-information variance and standard errors.
//!
//! Purpose
//! -------
//! Turn the curvature of a fitted **mean** log-likelihood into classical and
//! robust (sandwich) standard errors. The Hessian comes from the scalar
//! central-difference stencil in `loglik_optimizer::finite_diff`; the linear
//! algebra runs on `nalgebra` via a symmetric eigendecomposition.
//!
//! Key behaviors
//! -------------
//! - Observed information on the mean scale is `J = −∇²ℓ̄(θ̂)`.
//! - Classical: `Var(θ̂) = J⁺ / n`.
//! - Robust: `Var(θ̂) = J⁺ S J⁺ / n`, with `S` the average outer product of
//!   per-observation scores (see `inference::scores`).
//! - No explicit inverse is formed. Eigenvalues at or below [`EIGEN_EPS`]
//!   are dropped from the pseudoinverse, which inflates standard errors
//!   along weakly identified directions.
//!
//! Invariants & assumptions
//! ------------------------
//! - `f` is the mean log-likelihood `ℓ̄(θ) = (1/n) Σ_t ℓ_t(θ)`, smooth in a
//!   neighborhood of `θ̂`.
//! - `scores`, when given, is a `p × p` matrix on the average-score scale
//!   with the same parameter ordering as `θ̂`.
//!
//! Testing notes
//! -------------
//! - Quadratic log-likelihoods with known information check the classical
//!   path; a doubled score covariance checks the robust path.
use crate::{
    inference::errors::{InferenceError, InferenceResult},
    optimization::{
        errors::OptResult, loglik_optimizer::finite_diff::loglik_hessian,
        numerical_stability::EIGEN_EPS,
    },
};
use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{Array1, Array2};

/// Standard errors from the observed information of a mean log-likelihood.
///
/// # Parameters
/// - `f`: mean log-likelihood `θ ↦ ℓ̄(θ)`.
/// - `theta_hat`: the estimate at which curvature is evaluated.
/// - `scores`: optional `p × p` score covariance `S`; `Some` selects the
///   sandwich estimator.
/// - `n_obs`: number of observations behind the mean, used to rescale the
///   mean-scale variance to the estimator's variance.
///
/// # Errors
/// - [`InferenceError::Derivatives`] if the Hessian cannot be evaluated.
/// - [`InferenceError::DegenerateInformation`] if no direction has positive
///   curvature.
/// - [`InferenceError::NonFiniteStandardError`] if a variance is not finite.
pub fn calc_standard_errors<F>(
    f: F, theta_hat: &Array1<f64>, scores: Option<&Array2<f64>>, n_obs: usize,
) -> InferenceResult<Array1<f64>>
where
    F: Fn(&Array1<f64>) -> OptResult<f64>,
{
    let p = theta_hat.len();
    let obs_info = -loglik_hessian(f, theta_hat)?;
    let mut obs_info_nalg = DMatrix::<f64>::zeros(p, p);
    fill_dmatrix(&obs_info, &mut obs_info_nalg);
    let eigen = obs_info_nalg.symmetric_eigen();
    if eigen.eigenvalues.iter().all(|&lambda| lambda <= EIGEN_EPS) {
        return Err(InferenceError::DegenerateInformation);
    }

    let mean_var = match scores {
        Some(s) => sandwich_variances(&eigen, s, p),
        None => classical_variances(&eigen, p),
    };
    let scale = n_obs.max(1) as f64;
    let mut se = Array1::<f64>::zeros(p);
    for (index, (&v, out)) in mean_var.iter().zip(se.iter_mut()).enumerate() {
        let value = (v / scale).sqrt();
        if !value.is_finite() {
            return Err(InferenceError::NonFiniteStandardError { index, value });
        }
        *out = value;
    }
    Ok(se)
}

// ---- Helper methods ----

/// Copy a square `ndarray` matrix into a preallocated `DMatrix`.
fn fill_dmatrix(obs_info: &Array2<f64>, obs_info_nalg: &mut DMatrix<f64>) {
    let n = obs_info.ncols();
    for j in 0..n {
        for i in 0..n {
            obs_info_nalg[(i, j)] = obs_info[[i, j]];
        }
    }
}

/// Diagonal of the pseudoinverse: `Σ_{k: λ_k > EIGEN_EPS} Q[i,k]² / λ_k`.
fn classical_variances(eigen: &SymmetricEigen<f64, nalgebra::Dyn>, p: usize) -> Array1<f64> {
    let q = &eigen.eigenvectors;
    Array1::from_iter((0..p).map(|i| {
        eigen
            .eigenvalues
            .iter()
            .enumerate()
            .filter(|(_, lambda)| **lambda > EIGEN_EPS)
            .map(|(k, &lambda)| q[(i, k)] * q[(i, k)] / lambda)
            .sum::<f64>()
    }))
}

/// Diagonal of `J⁺ S J⁺`, computed column by column as `w_iᵀ S w_i` with
/// `w_i = J⁺ e_i`.
fn sandwich_variances(
    eigen: &SymmetricEigen<f64, nalgebra::Dyn>, scores: &Array2<f64>, p: usize,
) -> Array1<f64> {
    let q = &eigen.eigenvectors;
    let mut var = Array1::<f64>::zeros(p);
    for i in 0..p {
        let mut w_i = Array1::<f64>::zeros(p);
        for (k, &lambda) in eigen.eigenvalues.iter().enumerate() {
            if lambda > EIGEN_EPS {
                let coeff = q[(i, k)] / lambda;
                for j in 0..p {
                    w_i[j] += coeff * q[(j, k)];
                }
            }
        }
        var[i] = w_i.dot(&scores.dot(&w_i));
    }
    var
}
