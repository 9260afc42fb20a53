//! errors — crate-wide error taxonomy.
//!
//! Purpose
//! -------
//! Give every subsystem error a common classification so orchestration code
//! can decide whether a failure aborts an analysis or is recorded against a
//! single fit while the remaining fits continue.
//!
//! Key behaviors
//! -------------
//! - [`ErrorKind`] partitions failures into data, convergence, numerical and
//!   configuration problems.
//! - Each subsystem error enum (`SeriesError`, `OptError`, `GarchError`,
//!   `DiagError`, `HmmError`, `EvalError`, `PipelineError`) exposes a
//!   `kind()` accessor returning one of these classes.
//!
//! Conventions
//! -----------
//! - Data and configuration errors are validated at component entry and are
//!   fatal for the call that raised them.
//! - Convergence and numerical errors are recoverable per model: the caller
//!   records them and carries on with independent fits.
use serde::Serialize;

/// Failure class shared by all subsystem errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Insufficient length, non-finite values, bad timestamps.
    Data,
    /// An iterative routine exhausted its budget without meeting tolerance.
    Convergence,
    /// Non-finite likelihood, singular covariance, invalid variance path.
    Numerical,
    /// Invalid configuration supplied by the caller.
    Config,
}

impl ErrorKind {
    /// Whether a failure of this class is isolated to a single fit.
    pub fn is_recoverable(self) -> bool {
        matches!(self, ErrorKind::Convergence | ErrorKind::Numerical)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Data => "DataError",
            ErrorKind::Convergence => "ConvergenceError",
            ErrorKind::Numerical => "NumericalError",
            ErrorKind::Config => "ConfigError",
        };
        f.write_str(name)
    }
}
