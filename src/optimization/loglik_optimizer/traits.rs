//! Model-facing trait, optimizer options and the normalized outcome.
//!
//! A model implements [`LogLikelihood`] over its own data payload; the GARCH
//! models return the **mean** per-observation log-likelihood so tolerances
//! do not scale with the sample length. [`maximize`](super::maximize)
//! minimizes `c(θ) = −ℓ(θ)` and reports `ℓ` back in [`OptimOutcome`].
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use serde::Serialize;
use std::str::FromStr;

/// A log-likelihood `ℓ(θ)` over unconstrained coordinates.
///
/// `check` runs once on the starting point. `grad`, when implemented,
/// returns `∇ℓ(θ)` (not the cost gradient); the default reports
/// [`OptError::GradientNotImplemented`] and the optimizer differences the
/// cost numerically.
pub trait LogLikelihood {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Line search used inside L-BFGS. Parses case-insensitively from
/// `"MoreThuente"` or `"HagerZhang"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimizer configuration.
///
/// `verbose` only has an effect with the `obs_slog` feature. `fallback`
/// retries with Nelder–Mead from the same start when the L-BFGS run errors
/// (typically a failed line search); a run that merely exhausts
/// `max_iter` is returned as not converged instead.
///
/// The default is More–Thuente, `tol_grad = 1e-6`, 300 iterations, no
/// fallback. GARCH fits use their own defaults (see `GarchOptions`).
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
    pub fallback: Option<NelderMeadOptions>,
}

impl MLEOptions {
    /// Options without a fallback solver.
    ///
    /// # Errors
    /// [`OptError::InvalidLBFGSMem`] for a zero history length.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem, fallback: None })
    }

    /// Attach a Nelder–Mead fallback.
    pub fn with_fallback(mut self, fallback: NelderMeadOptions) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(300) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
            fallback: None,
        }
    }
}

/// Settings for the derivative-free Nelder–Mead fallback.
///
/// - `max_iter`: iteration cap for the simplex search.
/// - `sd_tol`: stop when the standard deviation of the simplex costs falls
///   below this value.
/// - `initial_step`: offset applied to each coordinate of `θ₀` to build the
///   initial simplex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelderMeadOptions {
    pub max_iter: usize,
    pub sd_tol: f64,
    pub initial_step: f64,
}

impl NelderMeadOptions {
    /// Construct validated Nelder–Mead settings.
    ///
    /// # Errors
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    /// - [`OptError::InvalidSimplex`] if `sd_tol` or `initial_step` is not
    ///   finite and strictly positive.
    pub fn new(max_iter: usize, sd_tol: f64, initial_step: f64) -> OptResult<Self> {
        if max_iter == 0 {
            return Err(OptError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        for value in [sd_tol, initial_step] {
            if !value.is_finite() || value <= 0.0 {
                return Err(OptError::InvalidSimplex {
                    value,
                    reason: "Simplex tolerance and step must be finite and positive.",
                });
            }
        }
        Ok(Self { max_iter, sd_tol, initial_step })
    }
}

impl Default for NelderMeadOptions {
    fn default() -> Self {
        Self { max_iter: 5_000, sd_tol: 1e-10, initial_step: 0.25 }
    }
}

/// Stopping rules: gradient norm, cost change and an iteration cap. Any
/// may be `None`, but not all three.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] when every rule is `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for a
    ///   non-finite or non-positive tolerance.
    /// - [`OptError::InvalidMaxIter`] for a zero cap.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Which solver produced an [`OptimOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolverKind {
    Lbfgs,
    NelderMead,
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverKind::Lbfgs => f.write_str("L-BFGS"),
            SolverKind::NelderMead => f.write_str("Nelder-Mead"),
        }
    }
}

/// Best point of a run, with its log-likelihood `value` (not the cost).
///
/// `converged` is `true` only when a tolerance stopped the run; hitting
/// `max_iter` is not convergence, and GARCH fits reject such outcomes.
/// `grad_norm` is absent for Nelder–Mead.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
    pub solver: SolverKind,
}

impl OptimOutcome {
    /// Normalize a final solver state.
    ///
    /// # Errors
    /// Missing or non-finite estimates and non-finite values.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>, solver: SolverKind,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match &termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(TerminationReason::MaxItersReached) => {
                (false, format!("{termination:?}"))
            }
            TerminationStatus::Terminated(_) => (true, format!("{termination:?}")),
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals, grad_norm, solver })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validation rules of `Tolerances`, `MLEOptions`, `NelderMeadOptions`.
    // - Line-search parsing.
    // - Convergence mapping in `OptimOutcome::new`.
    //
    // They intentionally DO NOT cover:
    // - Running a solver (see `api`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // At least one stopping rule is required.
    fn tolerances_reject_all_none() {
        assert_eq!(Tolerances::new(None, None, None), Err(OptError::NoTolerancesProvided));
    }

    #[test]
    fn tolerances_reject_non_positive_values() {
        assert!(matches!(
            Tolerances::new(Some(-1.0), None, None),
            Err(OptError::InvalidTolGrad { .. })
        ));
        assert!(matches!(
            Tolerances::new(None, Some(f64::NAN), None),
            Err(OptError::InvalidTolCost { .. })
        ));
        let err = Tolerances::new(None, None, Some(0));
        assert!(matches!(err, Err(OptError::InvalidMaxIter { .. })));
    }

    #[test]
    fn mle_options_reject_zero_memory() {
        let tols = Tolerances::new(Some(1e-6), None, Some(10)).unwrap();
        let err = MLEOptions::new(tols, LineSearcher::HagerZhang, false, Some(0)).unwrap_err();
        assert!(matches!(err, OptError::InvalidLBFGSMem { mem: 0, .. }));
    }

    #[test]
    fn nelder_mead_options_validate_inputs() {
        assert!(NelderMeadOptions::new(100, 1e-8, 0.1).is_ok());
        assert!(matches!(
            NelderMeadOptions::new(100, 0.0, 0.1),
            Err(OptError::InvalidSimplex { .. })
        ));
        assert!(matches!(
            NelderMeadOptions::new(0, 1e-8, 0.1),
            Err(OptError::InvalidMaxIter { .. })
        ));
    }

    #[test]
    fn line_searcher_parses_case_insensitively() {
        assert_eq!("HAGERZHANG".parse::<LineSearcher>(), Ok(LineSearcher::HagerZhang));
        assert_eq!("morethuente".parse::<LineSearcher>(), Ok(LineSearcher::MoreThuente));
        assert!("bfgs".parse::<LineSearcher>().is_err());
    }

    #[test]
    // Purpose
    // -------
    // Hitting the iteration cap is reported as non-convergence.
    //
    // Given
    // -----
    // - A termination status of `MaxItersReached`, and one of `SolverConverged`.
    //
    // Expect
    // ------
    // - `converged == false` for the cap, `true` for solver convergence.
    fn outcome_treats_max_iters_as_not_converged() {
        // Arrange
        let capped = TerminationStatus::Terminated(TerminationReason::MaxItersReached);
        let solved = TerminationStatus::Terminated(TerminationReason::SolverConverged);

        // Act
        let a = OptimOutcome::new(
            Some(array![1.0]),
            -1.0,
            capped,
            10,
            FnEvalMap::new(),
            None,
            SolverKind::Lbfgs,
        )
        .unwrap();
        let b = OptimOutcome::new(
            Some(array![1.0]),
            -1.0,
            solved,
            3,
            FnEvalMap::new(),
            Some(array![3.0, 4.0]),
            SolverKind::Lbfgs,
        )
        .unwrap();

        // Assert
        assert!(!a.converged);
        assert!(b.converged);
        assert_eq!(b.grad_norm, Some(5.0));
    }

    #[test]
    fn outcome_rejects_missing_or_non_finite_estimates() {
        let status = TerminationStatus::Terminated(TerminationReason::SolverConverged);
        let missing = OptimOutcome::new(
            None,
            0.0,
            status.clone(),
            1,
            FnEvalMap::new(),
            None,
            SolverKind::Lbfgs,
        );
        assert_eq!(missing.unwrap_err(), OptError::MissingThetaHat);
        let bad = OptimOutcome::new(
            Some(array![f64::NAN]),
            0.0,
            status,
            1,
            FnEvalMap::new(),
            None,
            SolverKind::NelderMead,
        );
        assert!(matches!(bad, Err(OptError::InvalidThetaHat { index: 0, .. })));
    }
}
