//! series::errors — validation failures for return series.
use chrono::NaiveDate;
use thiserror::Error;

use crate::errors::ErrorKind;

pub type SeriesResult<T> = Result<T, SeriesError>;

/// Errors raised while constructing a [`ReturnSeries`](super::ReturnSeries).
///
/// Every variant is a data error: the input cannot be used by any
/// downstream estimator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("Return series is empty.")]
    EmptySeries,

    #[error("Timestamp count ({dates}) does not match value count ({values}).")]
    LengthMismatch { dates: usize, values: usize },

    #[error("Return at index {index} is non-finite: {value}")]
    NonFiniteValue { index: usize, value: f64 },

    #[error("Duplicate timestamp {date} at index {index}.")]
    DuplicateTimestamp { index: usize, date: NaiveDate },

    #[error("Timestamp {date} at index {index} precedes its predecessor {previous}.")]
    NonMonotonicTimestamp { index: usize, date: NaiveDate, previous: NaiveDate },
}

impl SeriesError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Data
    }
}
