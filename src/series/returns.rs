//! Validated daily log-return series.
//!
//! Purpose
//! -------
//! Provide the single input container consumed by every estimator in the
//! crate. Validation happens once, at construction, so volatility models,
//! the regime detector and the evaluator can assume clean data.
//!
//! Invariants & assumptions
//! ------------------------
//! - The series is non-empty and has one timestamp per value.
//! - Timestamps are strictly increasing (no duplicates).
//! - Every value is finite.
//! - Values are log returns in fraction units (0.01 = 1%); percent scaling
//!   is applied by the estimators that need it, never stored here.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path and each rejection branch of
//!   [`ReturnSeries::new`].
use chrono::NaiveDate;
use ndarray::Array1;

use crate::series::errors::{SeriesError, SeriesResult};

/// ReturnSeries — ordered `(date, log return)` observations.
///
/// Fields are private; the type is immutable once constructed. Cloning is
/// O(n) and only needed when ownership must cross a thread boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Construct a validated series from parallel date/value vectors.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::EmptySeries` when no observations are supplied.
    /// - `SeriesError::LengthMismatch` when the vectors differ in length.
    /// - `SeriesError::NonFiniteValue` for the first NaN/±∞ return.
    /// - `SeriesError::DuplicateTimestamp` / `NonMonotonicTimestamp` for the
    ///   first timestamp that does not strictly exceed its predecessor.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> SeriesResult<Self> {
        if dates.len() != values.len() {
            return Err(SeriesError::LengthMismatch { dates: dates.len(), values: values.len() });
        }
        if values.is_empty() {
            return Err(SeriesError::EmptySeries);
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(SeriesError::NonFiniteValue { index, value });
        }
        for (index, pair) in dates.windows(2).enumerate() {
            let (previous, date) = (pair[0], pair[1]);
            if date == previous {
                return Err(SeriesError::DuplicateTimestamp { index: index + 1, date });
            }
            if date < previous {
                return Err(SeriesError::NonMonotonicTimestamp { index: index + 1, date, previous });
            }
        }
        Ok(Self { dates, values })
    }

    /// Construct from `(date, value)` pairs.
    pub fn from_pairs<I>(pairs: I) -> SeriesResult<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let (dates, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self::new(dates, values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Last observed date. Always present because the series is non-empty.
    pub fn last_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    /// Returns multiplied by `factor`, e.g. `100.0` for percent units.
    pub fn scaled(&self, factor: f64) -> Array1<f64> {
        self.values.iter().map(|v| v * factor).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Successful construction and accessors.
    // - Each rejection branch of `ReturnSeries::new`.
    //
    // They intentionally DO NOT cover:
    // - Any estimator consuming the series.
    // -------------------------------------------------------------------------

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Valid input is accepted and exposed unchanged.
    //
    // Given
    // -----
    // - Three increasing dates and finite returns.
    //
    // Expect
    // ------
    // - `len() == 3`, `last_date()` is the final date, `scaled(100)` multiplies.
    fn new_accepts_valid_series() {
        // Arrange
        let dates = vec![day(2), day(3), day(4)];
        let values = vec![0.01, -0.02, 0.005];

        // Act
        let series = ReturnSeries::new(dates, values).expect("series should be valid");

        // Assert
        assert_eq!(series.len(), 3);
        assert_eq!(series.last_date(), day(4));
        let pct = series.scaled(100.0);
        assert!((pct[1] + 2.0).abs() < 1e-12);
    }

    #[test]
    fn new_rejects_empty_series() {
        let err = ReturnSeries::new(vec![], vec![]).unwrap_err();
        assert_eq!(err, SeriesError::EmptySeries);
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let err = ReturnSeries::new(vec![day(2)], vec![0.1, 0.2]).unwrap_err();
        assert_eq!(err, SeriesError::LengthMismatch { dates: 1, values: 2 });
    }

    #[test]
    // Purpose
    // -------
    // Non-finite returns are reported with their index.
    fn new_rejects_non_finite_value() {
        let err = ReturnSeries::new(vec![day(2), day(3)], vec![0.1, f64::NAN]).unwrap_err();
        match err {
            SeriesError::NonFiniteValue { index, .. } => assert_eq!(index, 1),
            other => panic!("Expected NonFiniteValue, got {other:?}"),
        }
    }

    #[test]
    fn new_rejects_duplicate_timestamp() {
        let err = ReturnSeries::new(vec![day(2), day(2)], vec![0.1, 0.2]).unwrap_err();
        assert_eq!(err, SeriesError::DuplicateTimestamp { index: 1, date: day(2) });
    }

    #[test]
    fn new_rejects_decreasing_timestamp() {
        let err = ReturnSeries::new(vec![day(3), day(2)], vec![0.1, 0.2]).unwrap_err();
        assert!(matches!(err, SeriesError::NonMonotonicTimestamp { index: 1, .. }));
        assert_eq!(err.kind(), crate::errors::ErrorKind::Data);
    }
}
