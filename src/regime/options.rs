//! HMM options — EM configuration for regime detection.
//!
//! Defaults: 2 states, 200 EM iterations, log-likelihood tolerance `1e-2`,
//! covariance floor `1e-3`, 10 k-means iterations for the initial means.
//! The random seed is not an option; it is passed explicitly to the fit.
use serde::{Deserialize, Serialize};

use crate::regime::errors::{HmmError, HmmResult};

/// Validated EM configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HmmOptions {
    /// Number of hidden states `K ≥ 1`.
    pub n_states: usize,
    /// Maximum number of EM iterations.
    pub max_iter: usize,
    /// Stop when the log-likelihood improves by less than this.
    pub tol: f64,
    /// Added to each covariance diagonal after every M-step.
    pub cov_floor: f64,
    /// Lloyd iterations used to seed the state means.
    pub kmeans_iter: usize,
}

impl HmmOptions {
    /// # Errors
    /// See [`HmmOptions::validate`].
    pub fn new(
        n_states: usize, max_iter: usize, tol: f64, cov_floor: f64, kmeans_iter: usize,
    ) -> HmmResult<Self> {
        let opts = Self { n_states, max_iter, tol, cov_floor, kmeans_iter };
        opts.validate()?;
        Ok(opts)
    }

    /// # Errors
    /// - [`HmmError::InvalidStates`] when `n_states == 0`.
    /// - [`HmmError::InvalidOption`] for a zero iteration cap or a
    ///   non-finite, non-positive tolerance or floor.
    pub fn validate(&self) -> HmmResult<()> {
        if self.n_states == 0 {
            return Err(HmmError::InvalidStates { value: self.n_states });
        }
        if self.max_iter == 0 {
            return Err(HmmError::InvalidOption {
                name: "max_iter",
                value: 0.0,
                reason: "must be greater than zero",
            });
        }
        for (name, value) in [("tol", self.tol), ("cov_floor", self.cov_floor)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(HmmError::InvalidOption {
                    name,
                    value,
                    reason: "must be finite and positive",
                });
            }
        }
        Ok(())
    }
}

impl Default for HmmOptions {
    fn default() -> Self {
        Self { n_states: 2, max_iter: 200, tol: 1e-2, cov_floor: 1e-3, kmeans_iter: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        assert!(HmmOptions::default().validate().is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Each invalid field is reported as a configuration error.
    fn new_rejects_invalid_fields() {
        let err = HmmOptions::new(0, 200, 1e-2, 1e-3, 10);
        assert_eq!(err, Err(HmmError::InvalidStates { value: 0 }));
        assert!(matches!(
            HmmOptions::new(2, 0, 1e-2, 1e-3, 10),
            Err(HmmError::InvalidOption { name: "max_iter", .. })
        ));
        assert!(matches!(
            HmmOptions::new(2, 200, f64::NAN, 1e-3, 10),
            Err(HmmError::InvalidOption { name: "tol", .. })
        ));
        assert!(matches!(
            HmmOptions::new(2, 200, 1e-2, -1.0, 10),
            Err(HmmError::InvalidOption { name: "cov_floor", .. })
        ));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let opts: HmmOptions = serde_json::from_str(r#"{"n_states": 3}"#).unwrap();
        assert_eq!(opts.n_states, 3);
        assert_eq!(opts.max_iter, 200);
    }
}
