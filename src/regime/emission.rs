//! Full-covariance Gaussian emission densities.
//!
//! Each state's covariance is factorized once per EM iteration with
//! `nalgebra`'s Cholesky decomposition; log densities then need only a
//! forward substitution:
//!
//! `ln N(x; μ, Σ) = −½ (d ln 2π + ln|Σ| + ‖L⁻¹(x − μ)‖²)`, `Σ = L Lᵀ`.
use nalgebra::DMatrix;
use ndarray::{Array1, Array2, ArrayView1};

use crate::regime::{
    errors::{HmmError, HmmResult},
    features::N_FEATURES,
};

const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Factorized Gaussian density for one state.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianEmission {
    mean: Array1<f64>,
    chol_l: Array2<f64>,
    log_norm: f64,
}

impl GaussianEmission {
    /// Factorize `cov` for state `state`.
    ///
    /// # Panics
    /// If the dimension exceeds [`N_FEATURES`].
    ///
    /// # Errors
    /// [`HmmError::SingularCovariance`] when `cov` is not positive definite
    /// or contains non-finite entries.
    pub fn new(mean: ArrayView1<f64>, cov: &Array2<f64>, state: usize) -> HmmResult<Self> {
        let d = mean.len();
        assert!(d <= N_FEATURES, "emission dimension exceeds the feature count");
        if cov.iter().any(|v| !v.is_finite()) {
            return Err(HmmError::SingularCovariance { state });
        }
        let dense = DMatrix::from_fn(d, d, |i, j| cov[[i, j]]);
        let chol = dense.cholesky().ok_or(HmmError::SingularCovariance { state })?;
        let l = chol.l();
        let chol_l = Array2::from_shape_fn((d, d), |(i, j)| l[(i, j)]);
        let log_det: f64 = (0..d).map(|i| 2.0 * chol_l[[i, i]].ln()).sum();
        if !log_det.is_finite() {
            return Err(HmmError::SingularCovariance { state });
        }
        Ok(Self { mean: mean.to_owned(), chol_l, log_norm: -0.5 * (d as f64 * LN_2PI + log_det) })
    }

    /// Log density at `x`.
    pub fn log_pdf(&self, x: ArrayView1<f64>) -> f64 {
        let mut y = [0.0_f64; N_FEATURES];
        let mut quad = 0.0;
        for i in 0..self.mean.len() {
            let mut acc = x[i] - self.mean[i];
            for j in 0..i {
                acc -= self.chol_l[[i, j]] * y[j];
            }
            y[i] = acc / self.chol_l[[i, i]];
            quad += y[i] * y[i];
        }
        self.log_norm - 0.5 * quad
    }
}

/// `n × K` matrix of `ln p(x_t | state k)`.
pub fn log_emission_matrix(rows: &Array2<f64>, emissions: &[GaussianEmission]) -> Array2<f64> {
    let mut out = Array2::<f64>::zeros((rows.nrows(), emissions.len()));
    for (x, mut out_row) in rows.rows().into_iter().zip(out.rows_mut()) {
        for (slot, emission) in out_row.iter_mut().zip(emissions) {
            *slot = emission.log_pdf(x);
        }
    }
    out
}
