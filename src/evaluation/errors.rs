//! Errors for forecast evaluation.
use thiserror::Error;

use crate::errors::ErrorKind;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    // ---- Data ----
    #[error("Evaluation Error: no forecast records to evaluate")]
    EmptyForecasts,

    #[error("Evaluation Error: {n} returns cannot fill a realized-volatility window of {window}")]
    InsufficientData { n: usize, window: usize },

    #[error("Evaluation Error: forecast for {asset}/{model} is non-finite: {value}")]
    NonFiniteForecast { asset: String, model: String, value: f64 },

    #[error("Evaluation Error: realized-volatility reference is non-finite: {value}")]
    NonFiniteReference { value: f64 },

    // ---- Configuration ----
    #[error("Evaluation Error: realized-volatility window must be at least 1, got {window}")]
    InvalidWindow { window: usize },
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::InvalidWindow { .. } => ErrorKind::Config,
            _ => ErrorKind::Data,
        }
    }
}
