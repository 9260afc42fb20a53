//! Feature construction for regime detection.
//!
//! Each timestep contributes the row `(r_t, r_t²)`. Both columns are
//! standardized once over the full sample (population standard deviation),
//! so the EM sees zero-mean, unit-variance features regardless of the
//! return units.
use ndarray::Array2;

use crate::{
    regime::errors::{HmmError, HmmResult},
    series::ReturnSeries,
};

/// Number of features per timestep.
pub const N_FEATURES: usize = 2;

/// Standardized `(return, squared return)` rows plus the scaling used.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    /// `n × 2` standardized features.
    pub rows: Array2<f64>,
    pub means: [f64; N_FEATURES],
    pub stds: [f64; N_FEATURES],
}

impl FeatureMatrix {
    /// Build standardized features from a return series.
    ///
    /// # Errors
    /// [`HmmError::ZeroVariance`] when a column is constant.
    pub fn from_series(series: &ReturnSeries) -> HmmResult<Self> {
        let n = series.len();
        let mut rows = Array2::<f64>::zeros((n, N_FEATURES));
        for (mut row, &r) in rows.rows_mut().into_iter().zip(series.values()) {
            row[0] = r;
            row[1] = r * r;
        }

        let mut means = [0.0; N_FEATURES];
        let mut stds = [0.0; N_FEATURES];
        for (j, mut column) in rows.columns_mut().into_iter().enumerate() {
            let mean = column.sum() / n as f64;
            let var = column.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
            if var.is_nan() || var <= 0.0 {
                return Err(HmmError::ZeroVariance { feature: j });
            }
            let std = var.sqrt();
            column.mapv_inplace(|x| (x - mean) / std);
            means[j] = mean;
            stds[j] = std;
        }
        Ok(Self { rows, means, stds })
    }

    pub fn len(&self) -> usize {
        self.rows.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.nrows() == 0
    }
}
