//! GARCH-family model fitting.
pub mod garch;
