//! One-step-ahead variance forecasting from a fitted terminal state.
//!
//! Purpose
//! -------
//! Roll the fitted recursion one step past the sample. Forecasts are pure
//! functions of the model-space parameters and the last in-sample residual
//! and variance; no data are revisited.
//!
//! Key behaviors
//! -------------
//! - GARCH11:  `σ²_{T+1} = ω + α ε²_T + β σ²_T`.
//! - GJRGARCH: adds `γ ε²_T 𝟙[ε_T < 0]`.
//! - EGARCH:   `σ²_{T+1} = exp(ω + β ln σ²_T)`. With no new information the
//!   shock terms drop out and only the constant and the decayed
//!   log-variance remain.
//! - Volatility in percent is `√σ²_{T+1} · 100 / scale`, so the output does
//!   not depend on the scaling applied before estimation.
//!
//! Invariants & assumptions
//! ------------------------
//! - `last_variance > 0` (the in-sample path is guarded).
//! - Forecast variances are clamped with the same guards as the fit.
use serde::Serialize;

use crate::garch::core::{guards::VarianceGuards, params::GarchParams, variant::GarchVariant};

/// Terminal in-sample state needed to forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TerminalState {
    /// Last residual `ε_T = r_T − μ`, in scaled units.
    pub last_residual: f64,
    /// Last conditional variance `σ²_T`, in scaled units.
    pub last_variance: f64,
}

/// One-step-ahead conditional variance in scaled units.
pub fn one_step_variance(
    variant: GarchVariant, params: &GarchParams, state: &TerminalState, guards: &VarianceGuards,
) -> f64 {
    let e = state.last_residual;
    let h = state.last_variance;
    match variant {
        GarchVariant::Garch => {
            guards.clamp_variance(params.omega + params.alpha * e * e + params.beta * h)
        }
        GarchVariant::GjrGarch => {
            let leverage = if e < 0.0 { params.gamma.unwrap_or(0.0) } else { 0.0 };
            let arch = (params.alpha + leverage) * e * e;
            guards.clamp_variance(params.omega + arch + params.beta * h)
        }
        GarchVariant::Egarch => {
            guards.clamp_log_variance(params.omega + params.beta * h.ln()).exp()
        }
    }
}

/// Convert a scaled variance into volatility in percent.
pub fn variance_to_vol_pct(variance: f64, scale: f64) -> f64 {
    variance.sqrt() * 100.0 / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Closed-form one-step forecasts for each variant.
    // - The leverage switch in GJR-GARCH.
    // - Scale invariance of the percent conversion.
    // -------------------------------------------------------------------------

    fn params(gamma: Option<f64>) -> GarchParams {
        GarchParams { mu: 0.0, omega: 0.05, alpha: 0.1, gamma, beta: 0.85 }
    }

    #[test]
    // Purpose
    // -------
    // Each variant applies its update once from the terminal state.
    //
    // Given
    // -----
    // - ε_T = −1.5, σ²_T = 2.0, ω = 0.05, α = 0.1, γ = 0.2, β = 0.85.
    //
    // Expect
    // ------
    // - GARCH: 0.05 + 0.225 + 1.7 = 1.975.
    // - GJR:   1.975 + 0.45 = 2.425.
    // - EGARCH: exp(0.05 + 0.85 ln 2).
    fn one_step_variance_matches_closed_forms() {
        // Arrange
        let state = TerminalState { last_residual: -1.5, last_variance: 2.0 };
        let g = VarianceGuards::default();

        // Act
        let garch = one_step_variance(GarchVariant::Garch, &params(None), &state, &g);
        let gjr = one_step_variance(GarchVariant::GjrGarch, &params(Some(0.2)), &state, &g);
        let egarch = one_step_variance(GarchVariant::Egarch, &params(Some(0.2)), &state, &g);

        // Assert
        assert_relative_eq!(garch, 1.975, epsilon = 1e-12);
        assert_relative_eq!(gjr, 2.425, epsilon = 1e-12);
        assert_relative_eq!(egarch, (0.05 + 0.85 * 2.0_f64.ln()).exp(), epsilon = 1e-12);
    }

    #[test]
    fn gjr_leverage_only_applies_to_negative_shocks() {
        let g = VarianceGuards::default();
        let p = params(Some(0.2));
        let up = TerminalState { last_residual: 1.5, last_variance: 2.0 };
        let garch = one_step_variance(GarchVariant::Garch, &p, &up, &g);
        let gjr = one_step_variance(GarchVariant::GjrGarch, &p, &up, &g);
        assert_relative_eq!(garch, gjr, epsilon = 1e-12);
    }

    #[test]
    fn variance_to_vol_pct_undoes_scaling() {
        // Variance 4 in percent² is 2 %; the same day in fraction units is 4e-4.
        assert_relative_eq!(variance_to_vol_pct(4.0, 100.0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(variance_to_vol_pct(4e-4, 1.0), 2.0, epsilon = 1e-12);
    }
}
