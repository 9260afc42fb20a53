//! Conditional-variance recursions and Gaussian log-likelihood.
//!
//! Purpose
//! -------
//! Evaluate the variance path `σ²_t` of each variant and the Gaussian
//! conditional log-likelihood built on it. These are the hot loops of
//! estimation: they run once per objective evaluation and never allocate
//! beyond the caller-provided buffer.
//!
//! Key behaviors
//! -------------
//! - Residuals are `ε_t = r_t − μ`.
//! - `σ²_0` is the sample variance (EGARCH: `ln σ²_0 = ln s²`); the path is
//!   aligned 1:1 with the input, so every observation contributes.
//! - Updates per variant, with `e = ε_{t−1}` and `h = σ²_{t−1}`:
//!   - GARCH11:  `σ²_t = ω + α e² + β h`
//!   - GJRGARCH: `σ²_t = ω + α e² + γ e² 𝟙[e < 0] + β h`
//!   - EGARCH:   `ln σ²_t = ω + α (|z| − E|z|) + γ z + β ln h`, `z = e/√h`
//! - Each update is clamped by [`VarianceGuards`]; a non-finite value is
//!   reported instead of propagated.
//! - `ℓ_t = −½ (ln 2π + ln σ²_t + ε²_t / σ²_t)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters are used as given; constraints are the optimizer mapping's
//!   job. Guards keep unconstrained natural-space perturbations finite.
use ndarray::Array1;

use crate::garch::{
    core::{data::GarchData, guards::VarianceGuards, params::GarchParams, variant::GarchVariant},
    errors::{GarchError, GarchResult},
};

/// `E|z|` for a standard normal `z`: `√(2/π)`.
pub const E_ABS_Z: f64 = std::f64::consts::FRAC_2_SQRT_PI * std::f64::consts::FRAC_1_SQRT_2;

const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// One guarded step of the variance recursion.
///
/// Given the previous residual `resid` and variance `var`, return the next
/// conditional variance. Shared by the in-sample path and the forecaster.
#[inline]
pub fn next_variance(
    variant: GarchVariant, params: &GarchParams, resid: f64, var: f64, guards: &VarianceGuards,
) -> f64 {
    match variant {
        GarchVariant::Garch => {
            guards.clamp_variance(params.omega + params.alpha * resid * resid + params.beta * var)
        }
        GarchVariant::GjrGarch => {
            let leverage = if resid < 0.0 { params.gamma.unwrap_or(0.0) } else { 0.0 };
            guards.clamp_variance(
                params.omega + (params.alpha + leverage) * resid * resid + params.beta * var,
            )
        }
        GarchVariant::Egarch => {
            let z = resid / var.sqrt();
            let log_var = params.omega
                + params.alpha * (z.abs() - E_ABS_Z)
                + params.gamma.unwrap_or(0.0) * z
                + params.beta * var.ln();
            guards.clamp_log_variance(log_var).exp()
        }
    }
}

/// Fill `out` with the conditional variance path `σ²_0, …, σ²_{n−1}`.
///
/// # Errors
/// [`GarchError::NonFiniteVariance`] at the first non-finite entry.
///
/// # Panics
/// If `out.len() != data.len()`.
pub fn fill_variance_path(
    variant: GarchVariant, params: &GarchParams, data: &GarchData, guards: &VarianceGuards,
    out: &mut [f64],
) -> GarchResult<()> {
    assert_eq!(out.len(), data.len(), "variance buffer must match the series length");
    let mut var = guards.clamp_variance(data.sample_variance);
    let mut prev_resid = 0.0;
    for (t, (slot, &r)) in out.iter_mut().zip(data.returns.iter()).enumerate() {
        if t > 0 {
            var = next_variance(variant, params, prev_resid, var, guards);
        }
        if !var.is_finite() {
            return Err(GarchError::NonFiniteVariance { index: t, value: var });
        }
        *slot = var;
        prev_resid = r - params.mu;
    }
    Ok(())
}

/// Per-observation Gaussian log-likelihood contributions `ℓ_t`.
///
/// # Errors
/// Propagates recursion errors; [`GarchError::NonFiniteLikelihood`] if any
/// contribution is not finite.
pub fn loglik_contributions(
    variant: GarchVariant, params: &GarchParams, data: &GarchData, guards: &VarianceGuards,
) -> GarchResult<Array1<f64>> {
    let mut var = vec![0.0; data.len()];
    fill_variance_path(variant, params, data, guards, &mut var)?;
    let mut out = Array1::<f64>::zeros(data.len());
    for ((slot, &r), &v) in out.iter_mut().zip(data.returns.iter()).zip(var.iter()) {
        let e = r - params.mu;
        let value = -0.5 * (LN_2PI + v.ln() + e * e / v);
        if !value.is_finite() {
            return Err(GarchError::NonFiniteLikelihood { value });
        }
        *slot = value;
    }
    Ok(out)
}

/// Mean log-likelihood `(1/n) Σ_t ℓ_t`, using `scratch` for the variance
/// path.
///
/// # Errors
/// Propagates recursion errors; [`GarchError::NonFiniteLikelihood`] if the
/// sum is not finite.
pub fn mean_loglik(
    variant: GarchVariant, params: &GarchParams, data: &GarchData, guards: &VarianceGuards,
    scratch: &mut [f64],
) -> GarchResult<f64> {
    fill_variance_path(variant, params, data, guards, scratch)?;
    let total: f64 = data
        .returns
        .iter()
        .zip(scratch.iter())
        .map(|(&r, &v)| {
            let e = r - params.mu;
            -0.5 * (LN_2PI + v.ln() + e * e / v)
        })
        .sum();
    let mean = total / data.len() as f64;
    if !mean.is_finite() {
        return Err(GarchError::NonFiniteLikelihood { value: mean });
    }
    Ok(mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::ReturnSeries;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Hand-checked single steps of each variant's update.
    // - Positivity of the variance path under guards.
    // - Agreement between the mean and per-observation likelihood forms.
    // -------------------------------------------------------------------------

    fn data(values: &[f64]) -> GarchData {
        let start = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        let dates = (0..values.len()).map(|i| start + chrono::Days::new(i as u64)).collect();
        let series = ReturnSeries::new(dates, values.to_vec()).unwrap();
        GarchData::new(&series, 100.0, 2).unwrap()
    }

    fn params(gamma: Option<f64>) -> GarchParams {
        GarchParams { mu: 0.0, omega: 0.1, alpha: 0.1, gamma, beta: 0.8 }
    }

    #[test]
    // Purpose
    // -------
    // One step of each update matches the closed form.
    //
    // Given
    // -----
    // - ω = 0.1, α = 0.1, β = 0.8, γ = 0.2; e = −2, h = 1.
    //
    // Expect
    // ------
    // - GARCH: 0.1 + 0.4 + 0.8 = 1.3.
    // - GJR:   1.3 + 0.2·4 = 2.1.
    // - EGARCH: exp(0.1 + 0.1(2 − E|z|) − 0.4 + 0).
    fn next_variance_matches_closed_forms() {
        // Arrange
        let g = VarianceGuards::default();

        // Act
        let garch = next_variance(GarchVariant::Garch, &params(None), -2.0, 1.0, &g);
        let gjr = next_variance(GarchVariant::GjrGarch, &params(Some(0.2)), -2.0, 1.0, &g);
        let egarch = next_variance(GarchVariant::Egarch, &params(Some(0.2)), -2.0, 1.0, &g);

        // Assert
        assert_relative_eq!(garch, 1.3, epsilon = 1e-12);
        assert_relative_eq!(gjr, 2.1, epsilon = 1e-12);
        assert_relative_eq!(egarch, (0.1 + 0.1 * (2.0 - E_ABS_Z) - 0.4).exp(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Guards keep the path strictly positive even for parameters that would
    // drive a raw recursion negative.
    //
    // Given
    // -----
    // - GARCH with ω = −5 (outside the constrained region).
    //
    // Expect
    // ------
    // - Every σ²_t ≥ guards.min > 0.
    fn variance_path_stays_positive_under_guards() {
        // Arrange
        let d = data(&[0.01, -0.02, 0.015, 0.0, -0.03, 0.01]);
        let p = GarchParams { mu: 0.0, omega: -5.0, alpha: 0.05, gamma: None, beta: 0.5 };
        let g = VarianceGuards::default();
        let mut out = vec![0.0; d.len()];

        // Act
        fill_variance_path(GarchVariant::Garch, &p, &d, &g, &mut out).unwrap();

        // Assert
        assert_relative_eq!(out[0], d.sample_variance, epsilon = 1e-12);
        assert!(out.iter().all(|&v| v >= g.min));
    }

    #[test]
    fn mean_loglik_matches_mean_of_contributions() {
        let d = data(&[0.01, -0.02, 0.015, 0.0, -0.03, 0.01, 0.004]);
        let g = VarianceGuards::default();
        for variant in GarchVariant::ALL {
            let p = params(if variant.has_gamma() { Some(0.05) } else { None });
            let contrib = loglik_contributions(variant, &p, &d, &g).unwrap();
            let mut scratch = vec![0.0; d.len()];
            let mean = mean_loglik(variant, &p, &d, &g, &mut scratch).unwrap();
            assert_relative_eq!(mean, contrib.sum() / d.len() as f64, epsilon = 1e-12);
        }
    }
}
