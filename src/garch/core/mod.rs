//! garch::core — building blocks shared by every GARCH-family fit.
//!
//! - `variant`: the tagged model selector.
//! - `data`: scaled, validated estimation input.
//! - `params`: model-space parameters and the optimizer-space mapping.
//! - `guards`: variance clamps.
//! - `recursion`: variance paths and the Gaussian likelihood.
//! - `init`: moment-matched starting values.
//! - `options`: estimation configuration.
//! - `forecasts`: one-step-ahead variance.
//! - `validation`: shared input checks.
pub mod data;
pub mod forecasts;
pub mod guards;
pub mod init;
pub mod options;
pub mod params;
pub mod recursion;
pub mod validation;
pub mod variant;
