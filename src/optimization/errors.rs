//! optimization::errors — unified error surface for the optimizer layer.
//!
//! Purpose
//! -------
//! Collect configuration problems, numerical failures inside cost/gradient
//! evaluation, backend (argmin) errors, and model-side evaluation failures
//! into one enum, [`OptError`], with the result alias [`OptResult`].
//!
//! Key behaviors
//! -------------
//! - `From<argmin::core::Error>` first recovers an `OptError` that was
//!   boxed into argmin's error type by a cost or gradient closure, and only
//!   then falls back to mapping `ArgminError` variants.
//! - Model errors (e.g. `GarchError`) convert into [`OptError::Model`],
//!   preserving their [`ErrorKind`] so the classification survives the
//!   trip through the optimizer.
//! - [`OptError::kind`] classifies every variant.
use argmin::core::{ArgminError, Error};
use thiserror::Error;

use crate::errors::ErrorKind;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptError {
    // ---- Gradient ----
    /// Signals that finite differences should be used.
    #[error("Gradient optimization not implemented")]
    GradientNotImplemented,

    #[error("Gradient dimension mismatch: expected {expected}, found {found}")]
    GradientDimMismatch { expected: usize, found: usize },

    #[error("Invalid gradient at index {index}: {value}: {reason}")]
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- MLEOptions ----
    #[error("Invalid gradient tolerance {tol}: {reason}")]
    InvalidTolGrad { tol: f64, reason: &'static str },

    #[error("Invalid cost function change tolerance {tol}: {reason}")]
    InvalidTolCost { tol: f64, reason: &'static str },

    #[error("Invalid maximum iterations {max_iter}: {reason}")]
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    #[error("No tolerances provided")]
    NoTolerancesProvided,

    #[error("Invalid line searcher '{name}': {reason}")]
    InvalidLineSearch { name: String, reason: &'static str },

    #[error("Invalid L-BFGS memory {mem}: {reason}")]
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    #[error("Invalid Nelder-Mead setting {value}: {reason}")]
    InvalidSimplex { value: f64, reason: &'static str },

    // ---- Cost function ----
    #[error("Non-finite cost value: {value}")]
    NonFiniteCost { value: f64 },

    // ---- Optimizer outcome ----
    #[error("Invalid estimated parameter at index {index}: {value}: {reason}")]
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },

    #[error("Missing estimated parameters (theta hat)")]
    MissingThetaHat,

    // ---- Argmin ----
    #[error("Invalid parameter: {text}")]
    InvalidParameter { text: String },
    #[error("Not implemented: {text}")]
    NotImplemented { text: String },
    #[error("Not initialized: {text}")]
    NotInitialized { text: String },
    #[error("Condition violated: {text}")]
    ConditionViolated { text: String },
    #[error("Checkpoint not found: {text}")]
    CheckPointNotFound { text: String },
    #[error("Potential bug: {text}")]
    PotentialBug { text: String },
    #[error("Impossible error: {text}")]
    ImpossibleError { text: String },
    #[error("Backend error: {text}")]
    BackendError { text: String },

    // ---- Finite Diffs ----
    #[error("Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}")]
    HessianDimMismatch { expected: usize, found: (usize, usize) },

    #[error("Invalid Hessian at ({row}, {col}): {value}, must be finite")]
    InvalidHessian { row: usize, col: usize, value: f64 },

    // ---- Model ----
    /// Failure raised by a model's log-likelihood, carried with its class.
    #[error("{text}")]
    Model { kind: ErrorKind, text: String },

    #[error("Unknown error")]
    UnknownError,
}

impl OptError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OptError::InvalidTolGrad { .. }
            | OptError::InvalidTolCost { .. }
            | OptError::InvalidMaxIter { .. }
            | OptError::NoTolerancesProvided
            | OptError::InvalidLineSearch { .. }
            | OptError::InvalidLBFGSMem { .. }
            | OptError::InvalidSimplex { .. } => ErrorKind::Config,
            OptError::Model { kind, .. } => *kind,
            _ => ErrorKind::Numerical,
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Classification of configuration vs numerical vs model errors.
    // - Recovery of an `OptError` that was boxed into argmin's error type.
    // - Mapping of `ArgminError` variants.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Tolerance problems are configuration errors, model errors keep their class.
    fn kind_classifies_config_numerical_and_model_errors() {
        assert_eq!(OptError::NoTolerancesProvided.kind(), ErrorKind::Config);
        assert_eq!(OptError::NonFiniteCost { value: f64::NAN }.kind(), ErrorKind::Numerical);
        let model = OptError::Model { kind: ErrorKind::Data, text: "short".to_string() };
        assert_eq!(model.kind(), ErrorKind::Data);
    }

    #[test]
    // Purpose
    // -------
    // An `OptError` raised inside a cost closure survives the argmin boundary.
    //
    // Given
    // -----
    // - `OptError::NonFiniteCost` converted into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - Converting back yields the identical variant.
    fn from_argmin_error_recovers_boxed_opt_error() {
        // Arrange
        let boxed: Error = OptError::NonFiniteCost { value: f64::INFINITY }.into();

        // Act
        let recovered = OptError::from(boxed);

        // Assert
        assert_eq!(recovered, OptError::NonFiniteCost { value: f64::INFINITY });
    }

    #[test]
    fn from_argmin_error_maps_argmin_variants() {
        let boxed: Error = ArgminError::NotImplemented { text: "x".to_string() }.into();
        assert_eq!(OptError::from(boxed), OptError::NotImplemented { text: "x".to_string() });
    }
}
