//! garch — GARCH-family conditional volatility models.
//!
//! Purpose
//! -------
//! Fit GARCH(1,1), EGARCH(1,1) and GJR-GARCH(1,1) with a constant mean by
//! Gaussian maximum likelihood, and produce the in-sample volatility path,
//! standardized residuals and a one-step-ahead volatility forecast.
//!
//! Key behaviors
//! -------------
//! - Variants are a tagged enum ([`GarchVariant`]) dispatched by free
//!   functions; fitted results are immutable values ([`GarchFit`]).
//! - Returns are multiplied by a configurable scale (default ×100) before
//!   estimation; reported volatilities are always in percent.
//! - Optimization runs in unconstrained coordinates: softplus for `ω` and a
//!   scaled softmax over the persistence terms keep every candidate
//!   positive and stationary; EGARCH bounds `β` with a scaled `tanh`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The variance path is aligned 1:1 with the input and strictly positive.
//! - A fit that does not converge, or whose persistence is not below one,
//!   is reported as an error rather than returned.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each building block; parameter recovery on a
//!   long simulated sample is exercised in the integration tests.
pub mod core;
pub mod errors;
pub mod models;

pub use self::core::{
    forecasts::TerminalState, guards::VarianceGuards, options::GarchOptions, params::GarchParams,
    variant::GarchVariant,
};
pub use self::errors::{GarchError, GarchResult};
pub use self::models::garch::{GarchFit, GarchModel, VolatilityPoint, fit_garch};
