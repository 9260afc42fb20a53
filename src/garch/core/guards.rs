//! Variance guards for GARCH-family recursions.
//!
//! Purpose
//! -------
//! Keep the conditional variance `σ²_t` inside a finite, strictly positive
//! range while the optimizer explores parameter space, so every candidate
//! point yields a finite log-likelihood instead of `ln 0` or `exp` overflow.
//!
//! Conventions
//! -----------
//! - Bounds are in scaled variance units (percent² with the default ×100
//!   return scaling).
//! - Variance-level models clamp `σ²_t`; EGARCH clamps `ln σ²_t` to
//!   `[ln min, ln max]` before exponentiating.
//! - A `NaN` variance is not clamped; the recursion reports it as an error.
use crate::garch::errors::{GarchError, GarchResult};

/// Validated lower/upper bounds for `σ²_t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceGuards {
    /// Lower bound (strictly > 0).
    pub min: f64,
    /// Upper bound (strictly > `min`).
    pub max: f64,
}

impl VarianceGuards {
    /// Construct guards from `(min, max)`.
    ///
    /// # Errors
    /// [`GarchError::InvalidVarianceGuards`] unless both bounds are finite
    /// and `0 < min < max`.
    pub fn new(value: (f64, f64)) -> GarchResult<Self> {
        let (min, max) = value;
        if !min.is_finite() || !max.is_finite() {
            return Err(GarchError::InvalidVarianceGuards {
                min,
                max,
                reason: "Bounds must be finite.",
            });
        }
        if min <= 0.0 {
            return Err(GarchError::InvalidVarianceGuards {
                min,
                max,
                reason: "Lower bound must be positive.",
            });
        }
        if min >= max {
            return Err(GarchError::InvalidVarianceGuards {
                min,
                max,
                reason: "Lower bound must be below the upper bound.",
            });
        }
        Ok(VarianceGuards { min, max })
    }

    #[inline]
    pub fn clamp_variance(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    #[inline]
    pub fn clamp_log_variance(&self, value: f64) -> f64 {
        value.clamp(self.min.ln(), self.max.ln())
    }
}

impl Default for VarianceGuards {
    fn default() -> Self {
        VarianceGuards { min: 1e-8, max: 1e8 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Acceptance of valid bounds and each rejection reason.
    // - Clamping in level and log space.
    // -------------------------------------------------------------------------

    #[test]
    fn new_accepts_valid_bounds() {
        let g = VarianceGuards::new((1e-6, 1e6)).unwrap();
        assert_eq!(g.min, 1e-6);
        assert_eq!(g.max, 1e6);
    }

    #[test]
    // Purpose
    // -------
    // Each invalid configuration is rejected with its own reason.
    fn new_rejects_invalid_bounds() {
        for (pair, reason) in [
            ((f64::NAN, 1.0), "Bounds must be finite."),
            ((0.0, 1.0), "Lower bound must be positive."),
            ((2.0, 1.0), "Lower bound must be below the upper bound."),
        ] {
            match VarianceGuards::new(pair) {
                Err(GarchError::InvalidVarianceGuards { reason: r, .. }) => assert_eq!(r, reason),
                other => panic!("expected InvalidVarianceGuards, got {other:?}"),
            }
        }
    }

    #[test]
    fn clamps_in_level_and_log_space() {
        let g = VarianceGuards::new((1e-4, 1e4)).unwrap();
        assert_eq!(g.clamp_variance(-3.0), 1e-4);
        assert_eq!(g.clamp_variance(1e9), 1e4);
        assert_eq!(g.clamp_variance(2.5), 2.5);
        assert_eq!(g.clamp_log_variance(1e3), 1e4_f64.ln());
        assert!(g.clamp_variance(f64::NAN).is_nan());
    }
}
