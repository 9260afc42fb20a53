//! volregime — conditional volatility and regime analysis of daily returns.
//!
//! Purpose
//! -------
//! Serve as the crate root: estimate GARCH-family conditional variance
//! models by maximum likelihood, forecast one step ahead, check the fitted
//! residuals, detect volatility regimes with a Gaussian hidden Markov model
//! and score volatility forecasts against realized volatility.
//!
//! Key behaviors
//! -------------
//! - [`series::ReturnSeries`] is the validated input of every estimator.
//! - [`garch`] fits GARCH(1,1), EGARCH(1,1) and GJR-GARCH(1,1) with a
//!   constant mean through the generic [`optimization`] layer, with
//!   standard errors from [`inference`].
//! - [`statistical_tests`] provides the Ljung–Box test and normal QQ pairs.
//! - [`regime`] fits the HMM by Baum–Welch and decodes posteriors and the
//!   Viterbi path.
//! - [`evaluation`] computes realized volatility and forecast errors.
//! - [`pipeline`] runs all of the above per asset, in parallel.
//!
//! Invariants & assumptions
//! ------------------------
//! - Returns are log returns in fraction units; GARCH estimation rescales
//!   them (×100 by default) and reports volatility in percent.
//! - Every subsystem error maps onto [`errors::ErrorKind`]; convergence and
//!   numerical failures are recoverable per model, data and configuration
//!   failures are not.
//!
//! Downstream usage
//! ----------------
//! - Fetching prices, computing returns and writing results to disk are the
//!   caller's concern. All outputs derive `serde::Serialize`.
//! - Logging goes through `tracing`; install a subscriber to see it.

pub mod errors;
pub mod evaluation;
pub mod garch;
pub mod inference;
pub mod optimization;
pub mod pipeline;
pub mod regime;
pub mod series;
pub mod statistical_tests;
