//! GARCH-family parameters and their optimizer-space mapping.
//!
//! [`GarchParams`] holds model-space parameters `(μ, ω, α, γ, β)` and maps
//! them to and from the unconstrained vector θ seen by the optimizer. The
//! layout depends on the variant:
//!
//! | variant  | θ                                   | mapping                                   |
//! |----------|-------------------------------------|-------------------------------------------|
//! | GARCH11  | `[μ, θ_ω, l_α, l_β]`                | `ω = softplus(θ_ω)`, `(α, β) = softmax`   |
//! | GJRGARCH | `[μ, θ_ω, l_α, l_γ, l_β]`           | `(α/2, (α+γ)/2, β) = softmax`             |
//! | EGARCH   | `[μ, ω, α, γ, θ_β]`                 | `β = (1 − margin)·tanh(θ_β)`              |
//!
//! The scaled softmax carries an implicit slack weight, so every θ maps to a
//! strictly stationary point: `α + β < 1` for GARCH, and `|β| < 1` for
//! EGARCH. GJR weights the ARCH coefficients after positive and after
//! negative shocks, `α` and `α + γ`, each at half, so the softmax total is
//! exactly the persistence `α + γ/2 + β < 1`. Both shock coefficients stay
//! positive while `γ` itself may take either sign.
//!
//! A second, *natural* layout `[μ, ω, α, (γ,) β]` is the plain parameter
//! vector in model space. Standard errors are computed in this layout.
use ndarray::{Array1, ArrayView1};
use serde::Serialize;

use crate::{
    garch::{
        core::{validation::validate_theta, variant::GarchVariant},
        errors::GarchResult,
    },
    optimization::numerical_stability::{
        bounded_unit, bounded_unit_inv, safe_softmax, safe_softplus, safe_softplus_inv,
        softmax_logits,
    },
};

/// Model-space parameters of a fitted or candidate GARCH-family model.
///
/// - `mu`: constant conditional mean (scaled return units).
/// - `omega`: variance intercept; `> 0` except for EGARCH, where it is the
///   log-variance intercept and unrestricted.
/// - `alpha`: ARCH (shock magnitude) coefficient.
/// - `gamma`: asymmetry coefficient; `None` for symmetric GARCH.
/// - `beta`: persistence coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GarchParams {
    pub mu: f64,
    pub omega: f64,
    pub alpha: f64,
    pub gamma: Option<f64>,
    pub beta: f64,
}

impl GarchParams {
    /// Map an optimizer vector θ to model space.
    ///
    /// # Errors
    /// Returns a config error if θ has the wrong length or non-finite entries.
    pub fn from_theta(variant: GarchVariant, theta: ArrayView1<f64>) -> GarchResult<Self> {
        validate_theta(theta, variant)?;
        let mu = theta[0];
        let params = match variant {
            GarchVariant::Garch => {
                let mut w = [0.0; 2];
                safe_softmax(&[theta[2], theta[3]], &mut w);
                let omega = safe_softplus(theta[1]);
                GarchParams { mu, omega, alpha: w[0], gamma: None, beta: w[1] }
            }
            GarchVariant::GjrGarch => {
                let mut w = [0.0; 3];
                safe_softmax(&[theta[2], theta[3], theta[4]], &mut w);
                let (alpha, alpha_neg) = (2.0 * w[0], 2.0 * w[1]);
                GarchParams {
                    mu,
                    omega: safe_softplus(theta[1]),
                    alpha,
                    gamma: Some(alpha_neg - alpha),
                    beta: w[2],
                }
            }
            GarchVariant::Egarch => GarchParams {
                mu,
                omega: theta[1],
                alpha: theta[2],
                gamma: Some(theta[3]),
                beta: bounded_unit(theta[4]),
            },
        };
        Ok(params)
    }

    /// Map model-space parameters to an optimizer vector θ.
    ///
    /// Assumes the parameters lie inside the constrained region of
    /// `variant`; boundary weights are nudged inward by `softmax_logits`.
    pub fn to_theta(&self, variant: GarchVariant) -> Array1<f64> {
        let gamma = self.gamma.unwrap_or(0.0);
        match variant {
            GarchVariant::Garch => {
                let l = softmax_logits(&[self.alpha, self.beta]);
                Array1::from(vec![self.mu, safe_softplus_inv(self.omega), l[0], l[1]])
            }
            GarchVariant::GjrGarch => {
                let half_neg = 0.5 * (self.alpha + gamma);
                let l = softmax_logits(&[0.5 * self.alpha, half_neg, self.beta]);
                Array1::from(vec![self.mu, safe_softplus_inv(self.omega), l[0], l[1], l[2]])
            }
            GarchVariant::Egarch => Array1::from(vec![
                self.mu,
                self.omega,
                self.alpha,
                gamma,
                bounded_unit_inv(self.beta),
            ]),
        }
    }

    /// Natural parameter vector `[μ, ω, α, (γ,) β]`.
    pub fn to_natural(&self, variant: GarchVariant) -> Array1<f64> {
        match (variant.has_gamma(), self.gamma) {
            (true, g) => Array1::from(vec![
                self.mu,
                self.omega,
                self.alpha,
                g.unwrap_or(0.0),
                self.beta,
            ]),
            (false, _) => Array1::from(vec![self.mu, self.omega, self.alpha, self.beta]),
        }
    }

    /// Build parameters from a natural vector without applying constraints.
    ///
    /// Used to evaluate the likelihood at finite-difference perturbations
    /// of a fitted point.
    ///
    /// # Errors
    /// Returns a config error on a wrong length or non-finite entries.
    pub fn from_natural(variant: GarchVariant, phi: ArrayView1<f64>) -> GarchResult<Self> {
        validate_theta(phi, variant)?;
        Ok(if variant.has_gamma() {
            let gamma = Some(phi[3]);
            GarchParams { mu: phi[0], omega: phi[1], alpha: phi[2], gamma, beta: phi[4] }
        } else {
            GarchParams { mu: phi[0], omega: phi[1], alpha: phi[2], gamma: None, beta: phi[3] }
        })
    }

    /// Persistence of the variance process: `α + β` (GARCH),
    /// `α + β + γ/2` (GJR), `|β|` (EGARCH).
    pub fn persistence(&self, variant: GarchVariant) -> f64 {
        match variant {
            GarchVariant::Garch => self.alpha + self.beta,
            GarchVariant::GjrGarch => self.alpha + self.beta + 0.5 * self.gamma.unwrap_or(0.0),
            GarchVariant::Egarch => self.beta.abs(),
        }
    }

    /// Unconditional variance `ω / (1 − persistence)` for the
    /// variance-level models; `exp(ω / (1 − β))` for EGARCH's log level.
    pub fn unconditional_variance(&self, variant: GarchVariant) -> f64 {
        match variant {
            GarchVariant::Egarch => (self.omega / (1.0 - self.beta)).exp(),
            _ => self.omega / (1.0 - self.persistence(variant)),
        }
    }
}
