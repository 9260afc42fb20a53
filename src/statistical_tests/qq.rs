//! Normal quantile–quantile pairs for standardized residuals.
//!
//! Sorted residuals are paired with standard-normal quantiles evaluated at
//! Filliben's order-statistic medians:
//! - `m_n = 0.5^{1/n}`, `m_1 = 1 − m_n`,
//! - `m_i = (i − 0.3175) / (n + 0.365)` for `1 < i < n`.
//!
//! A least-squares reference line `sample ≈ intercept + slope · theoretical`
//! and its correlation are reported alongside the points; for Gaussian
//! residuals the slope is close to one and the correlation close to one.
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::statistical_tests::{
    errors::{DiagError, DiagResult},
    validation::validate_finite,
};

/// One point of a normal QQ comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QQPoint {
    pub theoretical: f64,
    pub sample: f64,
}

/// QQ points plus the least-squares reference line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QQPlot {
    pub points: Vec<QQPoint>,
    pub slope: f64,
    pub intercept: f64,
    pub correlation: f64,
}

impl QQPlot {
    /// Build QQ pairs for `data` against the standard normal.
    ///
    /// # Errors
    /// - [`DiagError::InsufficientData`] for fewer than two points.
    /// - [`DiagError::NonFiniteData`] for non-finite input.
    /// - [`DiagError::ZeroVariance`] when every residual is equal.
    pub fn normal(data: &[f64]) -> DiagResult<Self> {
        if data.len() < 2 {
            return Err(DiagError::InsufficientData { n: data.len(), lag: 1 });
        }
        validate_finite(data)?;
        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);

        let theoretical = normal_order_medians(sorted.len());
        let (slope, intercept, correlation) = least_squares(&theoretical, &sorted)?;
        let points = theoretical
            .into_iter()
            .zip(sorted)
            .map(|(theoretical, sample)| QQPoint { theoretical, sample })
            .collect();
        Ok(Self { points, slope, intercept, correlation })
    }
}

/// Standard-normal quantiles at Filliben's order-statistic medians.
pub fn normal_order_medians(n: usize) -> Vec<f64> {
    let std_normal = Normal::standard();
    let last = 0.5_f64.powf(1.0 / n as f64);
    (1..=n)
        .map(|i| {
            let m = if i == 1 {
                1.0 - last
            } else if i == n {
                last
            } else {
                (i as f64 - 0.3175) / (n as f64 + 0.365)
            };
            std_normal.inverse_cdf(m)
        })
        .collect()
}

fn least_squares(x: &[f64], y: &[f64]) -> DiagResult<(f64, f64, f64)> {
    let n = x.len() as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y) {
        sxx += (a - mx) * (a - mx);
        syy += (b - my) * (b - my);
        sxy += (a - mx) * (b - my);
    }
    if syy <= 0.0 {
        return Err(DiagError::ZeroVariance);
    }
    let slope = sxy / sxx;
    Ok((slope, my - slope * mx, sxy / (sxx * syy).sqrt()))
}
