//! Starting values for GARCH-family estimation.
//!
//! Starting points are moment-matched so the initial variance path is
//! already at the sample variance level:
//! - GARCH11:  `α = 0.05`, `β = 0.90`, `ω = s² (1 − α − β)`.
//! - GJRGARCH: `α = 0.03`, `γ = 0.08`, `β = 0.88`, `ω = s² (1 − α − γ/2 − β)`.
//! - EGARCH:   `α = 0.10`, `γ = −0.05`, `β = 0.90`, `ω = (1 − β) ln s²`.
//!
//! `μ` starts at the sample mean in every case.
use ndarray::Array1;

use crate::garch::core::{data::GarchData, params::GarchParams, variant::GarchVariant};

/// Moment-matched starting parameters in model space.
pub fn initial_params(variant: GarchVariant, data: &GarchData) -> GarchParams {
    let mu = data.sample_mean;
    let var = data.sample_variance;
    match variant {
        GarchVariant::Garch => {
            let (alpha, beta) = (0.05, 0.90);
            GarchParams { mu, omega: var * (1.0 - alpha - beta), alpha, gamma: None, beta }
        }
        GarchVariant::GjrGarch => {
            let (alpha, gamma, beta) = (0.03, 0.08, 0.88);
            let omega = var * (1.0 - alpha - 0.5 * gamma - beta);
            GarchParams { mu, omega, alpha, gamma: Some(gamma), beta }
        }
        GarchVariant::Egarch => {
            let beta = 0.90;
            let omega = (1.0 - beta) * var.ln();
            GarchParams { mu, omega, alpha: 0.10, gamma: Some(-0.05), beta }
        }
    }
}

/// Starting point in optimizer coordinates.
pub fn initial_theta(variant: GarchVariant, data: &GarchData) -> Array1<f64> {
    initial_params(variant, data).to_theta(variant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::ReturnSeries;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn data() -> GarchData {
        let values = [0.01, -0.012, 0.004, 0.02, -0.018, 0.006, -0.003, 0.011, -0.007, 0.009];
        let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
        let dates = (0..values.len()).map(|i| start + chrono::Days::new(i as u64)).collect();
        let series = ReturnSeries::new(dates, values.to_vec()).unwrap();
        GarchData::new(&series, 100.0, 10).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Starting points imply the sample variance as unconditional variance
    // and survive the round trip through optimizer coordinates.
    fn initial_params_match_sample_variance_and_round_trip() {
        let d = data();
        for variant in GarchVariant::ALL {
            let p = initial_params(variant, &d);
            assert!(p.persistence(variant) < 1.0);
            assert_relative_eq!(
                p.unconditional_variance(variant),
                d.sample_variance,
                max_relative = 1e-10
            );
            let back = GarchParams::from_theta(variant, initial_theta(variant, &d).view()).unwrap();
            assert_relative_eq!(back.alpha, p.alpha, epsilon = 1e-9);
            assert_relative_eq!(back.beta, p.beta, epsilon = 1e-9);
            assert_relative_eq!(back.omega, p.omega, max_relative = 1e-9);
        }
    }
}
