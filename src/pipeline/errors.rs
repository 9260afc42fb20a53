//! Errors for the analysis pipeline.
//!
//! [`PipelineError`] wraps the subsystem errors that abort an analysis
//! (data and configuration problems) and adds configuration failures of its
//! own. Recoverable per-model failures never surface here; they are
//! recorded in the report as [`FitFailure`](crate::pipeline::FitFailure)s.
use thiserror::Error;

use crate::{
    errors::ErrorKind, evaluation::EvalError, garch::GarchError, optimization::errors::OptError,
    regime::HmmError, statistical_tests::DiagError,
};

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("Pipeline Error: {0}")]
    Garch(#[from] GarchError),

    #[error("Pipeline Error: {0}")]
    Regime(#[from] HmmError),

    #[error("Pipeline Error: {0}")]
    Diagnostics(#[from] DiagError),

    #[error("Pipeline Error: {0}")]
    Evaluation(#[from] EvalError),

    #[error("Pipeline Error: {0}")]
    Optimizer(#[from] OptError),

    // ---- Configuration ----
    #[error("Pipeline Error: configuration could not be parsed: {reason}")]
    InvalidConfig { reason: String },

    #[error("Pipeline Error: at least one GARCH variant must be selected")]
    NoVariants,

    #[error("Pipeline Error: GARCH variant {name} selected more than once")]
    DuplicateVariant { name: String },

    #[error("Pipeline Error: asset '{name}' appears more than once")]
    DuplicateAsset { name: String },
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Garch(err) => err.kind(),
            PipelineError::Regime(err) => err.kind(),
            PipelineError::Diagnostics(err) => err.kind(),
            PipelineError::Evaluation(err) => err.kind(),
            PipelineError::Optimizer(err) => err.kind(),
            PipelineError::DuplicateAsset { .. } => ErrorKind::Data,
            PipelineError::InvalidConfig { .. }
            | PipelineError::NoVariants
            | PipelineError::DuplicateVariant { .. } => ErrorKind::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Wrapped errors keep the class of the subsystem that raised them.
    fn kind_delegates_to_wrapped_error() {
        let short = PipelineError::from(DiagError::InsufficientData { n: 5, lag: 10 });
        assert_eq!(short.kind(), ErrorKind::Data);
        let states = PipelineError::from(HmmError::InvalidStates { value: 0 });
        assert_eq!(states.kind(), ErrorKind::Config);
        assert_eq!(PipelineError::NoVariants.kind(), ErrorKind::Config);
    }
}
