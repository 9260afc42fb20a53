//! inference — standard errors for fitted maximum-likelihood models.
//!
//! Purpose
//! -------
//! Quantify estimation uncertainty after a fit. Given the mean
//! log-likelihood and the per-observation log-likelihood contributions as
//! functions of a parameter vector, [`standard_errors`] returns classical
//! (observed-information) and robust (Bollerslev–Wooldridge sandwich)
//! standard errors.
//!
//! Key behaviors
//! -------------
//! - Curvature: `inference::hessian` (central second differences, eigen
//!   pseudoinverse).
//! - Scores: per-observation gradients via central differences, averaged
//!   into an outer-product matrix in `inference::scores`.
//!
//! Conventions
//! -----------
//! - Callers choose the coordinates. The GARCH layer passes natural model
//!   parameters `(μ, ω, α, [γ,] β)`, so the standard errors are reported in
//!   model space without a delta-method step.
//! - Failures are returned as [`InferenceError`]; fitting code treats them
//!   as non-fatal and reports missing standard errors.

pub mod errors;
pub mod hessian;
pub mod scores;

use ndarray::Array1;
use serde::Serialize;

use crate::optimization::{errors::OptResult, loglik_optimizer::finite_diff::observation_jacobian};

pub use self::errors::{InferenceError, InferenceResult};
pub use self::hessian::calc_standard_errors;
pub use self::scores::outer_product_of_scores;

/// Classical and sandwich standard errors, aligned with the parameter
/// vector they were computed for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardErrors {
    pub classical: Vec<f64>,
    pub robust: Vec<f64>,
}

/// Compute classical and robust standard errors at `theta_hat`.
///
/// - `mean_loglik`: `θ ↦ (1/n) Σ_t ℓ_t(θ)`.
/// - `obs_loglik`: `θ ↦ (ℓ_1(θ), …, ℓ_n(θ))`.
///
/// # Errors
/// Propagates derivative, shape, and curvature failures as
/// [`InferenceError`].
pub fn standard_errors<F, G>(
    mean_loglik: F, obs_loglik: G, theta_hat: &Array1<f64>,
) -> InferenceResult<StandardErrors>
where
    F: Fn(&Array1<f64>) -> OptResult<f64>,
    G: Fn(&Array1<f64>) -> OptResult<Array1<f64>>,
{
    let raw_scores = observation_jacobian(obs_loglik, theta_hat)?;
    let n_obs = raw_scores.nrows();
    let opg = outer_product_of_scores(&raw_scores, theta_hat.len())?;
    let classical = calc_standard_errors(&mean_loglik, theta_hat, None, n_obs)?;
    let robust = calc_standard_errors(&mean_loglik, theta_hat, Some(&opg), n_obs)?;
    Ok(StandardErrors { classical: classical.to_vec(), robust: robust.to_vec() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array1;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Gaussian location model: for ℓ_t(m) = −½ (x_t − m)², both estimators
    // must agree with the textbook SE of a sample mean with known unit
    // variance when the data have unit sample variance.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Classical and robust SEs coincide for a correctly specified model.
    //
    // Given
    // -----
    // - x = (−1, 1, −1, 1) (mean 0, mean square 1), θ̂ = 0, n = 4.
    //
    // Expect
    // ------
    // - classical = robust = 1/sqrt(4) = 0.5.
    fn standard_errors_agree_for_gaussian_location_model() {
        // Arrange
        let x = Array1::from(vec![-1.0, 1.0, -1.0, 1.0]);
        let obs = |theta: &Array1<f64>| -> OptResult<Array1<f64>> {
            Ok(x.mapv(|v| -0.5 * (v - theta[0]).powi(2)))
        };
        let mean = |theta: &Array1<f64>| -> OptResult<f64> { Ok(obs(theta)?.sum() / 4.0) };

        // Act
        let se = standard_errors(mean, &obs, &Array1::from(vec![0.0])).expect("valid model");

        // Assert
        assert_relative_eq!(se.classical[0], 0.5, epsilon = 1e-5);
        assert_relative_eq!(se.robust[0], 0.5, epsilon = 1e-5);
    }
}
