//! series — validated return-series input for all estimators.
//!
//! Every estimator in the crate consumes a [`ReturnSeries`]: ordered,
//! strictly increasing daily timestamps paired with finite log returns.
//! Fetching prices and differencing them into returns is left to callers.

pub mod errors;
pub mod returns;

pub use self::errors::{SeriesError, SeriesResult};
pub use self::returns::ReturnSeries;
