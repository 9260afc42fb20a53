//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! This selects an L-BFGS solver with either Hager–Zhang or More–Thuente line
//! search, wraps the model in an `ArgMinAdapter` (which *minimizes* `-ℓ(θ)`),
//! and delegates the run to `run_lbfgs`. When the L-BFGS run errors and a
//! Nelder–Mead fallback is configured, the search is retried derivative-free
//! from the same starting point.
use tracing::debug;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_nelder_mead, build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::{run_lbfgs, run_nelder_mead},
        traits::{LineSearcher, LogLikelihood, MLEOptions},
    },
};

/// Maximize a log-likelihood `ℓ(θ)` using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an `ArgMinAdapter` that exposes a *minimization*
///   problem `c(θ) = -ℓ(θ)` to `argmin`.
/// - Builds an L-BFGS solver with either **Hager–Zhang** or **More–Thuente**
///   line search based on `opts.line_searcher` and runs it.
/// - If that run returns an error and `opts.fallback` is set, retries with
///   Nelder–Mead from `theta0`. A non-converged L-BFGS outcome is returned
///   as-is; only hard solver failures trigger the fallback.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors.
/// - Propagates the L-BFGS error when no fallback is configured, or the
///   Nelder–Mead error when the fallback also fails.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use volregime::optimization::errors::OptResult;
/// use volregime::optimization::loglik_optimizer::{maximize, LogLikelihood, MLEOptions, Theta};
///
/// struct Quadratic;
/// impl LogLikelihood for Quadratic {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Quadratic, array![0.1, -0.2, 0.3], &(), &MLEOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), volregime::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let start = opts.fallback.map(|_| theta0.clone());
    let problem = ArgMinAdapter::new(f, data);
    let primary = match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    };
    match (primary, opts.fallback, start) {
        (Err(err), Some(nm_opts), Some(theta0)) => {
            debug!(error = %err, "L-BFGS failed, retrying with Nelder-Mead");
            let solver = build_nelder_mead(&theta0, &nm_opts)?;
            run_nelder_mead(&nm_opts, ArgMinAdapter::new(f, data), solver)
        }
        (result, _, _) => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        loglik_optimizer::traits::{NelderMeadOptions, SolverKind, Tolerances},
    };
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - End-to-end maximization of a concave quadratic with both line searches.
    // - The Nelder–Mead fallback when L-BFGS cannot proceed.
    // - Propagation of `check` failures.
    // -------------------------------------------------------------------------

    struct ShiftedQuadratic {
        center: Theta,
    }

    impl LogLikelihood for ShiftedQuadratic {
        type Data = ();
        fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
            let d = theta - &self.center;
            Ok(-d.dot(&d))
        }
        fn check(&self, theta: &Theta, _: &()) -> OptResult<()> {
            if theta.len() != self.center.len() {
                return Err(OptError::GradientDimMismatch {
                    expected: self.center.len(),
                    found: theta.len(),
                });
            }
            Ok(())
        }
    }

    /// Reports a gradient that always fails validation, so L-BFGS errors.
    struct BrokenGradient;

    impl LogLikelihood for BrokenGradient {
        type Data = ();
        fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
            Ok(-(theta[0] - 2.0).powi(2))
        }
        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }
        fn grad(&self, theta: &Theta, _: &()) -> OptResult<Theta> {
            Ok(Theta::from_elem(theta.len() + 1, 0.0))
        }
    }

    #[test]
    // Purpose
    // -------
    // Both line searches locate the maximum of a concave quadratic.
    //
    // Given
    // -----
    // - ℓ(θ) = −‖θ − c‖² with c = (1, −2).
    //
    // Expect
    // ------
    // - θ̂ ≈ c, ℓ(θ̂) ≈ 0, converged, solver is L-BFGS.
    fn maximize_recovers_quadratic_center_for_both_line_searches() {
        for ls in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
            // Arrange
            let f = ShiftedQuadratic { center: array![1.0, -2.0] };
            let tols = Tolerances::new(Some(1e-8), None, Some(200)).unwrap();
            let opts = MLEOptions::new(tols, ls, false, None).unwrap();

            // Act
            let out = maximize(&f, array![0.0, 0.0], &(), &opts).expect("maximize should succeed");

            // Assert
            assert_abs_diff_eq!(out.theta_hat[0], 1.0, epsilon = 1e-4);
            assert_abs_diff_eq!(out.theta_hat[1], -2.0, epsilon = 1e-4);
            assert_abs_diff_eq!(out.value, 0.0, epsilon = 1e-6);
            assert!(out.converged);
            assert_eq!(out.solver, SolverKind::Lbfgs);
        }
    }

    #[test]
    // Purpose
    // -------
    // A hard L-BFGS failure is rescued by the configured Nelder–Mead fallback.
    //
    // Given
    // -----
    // - A model whose analytic gradient has the wrong dimension.
    // - Options with a Nelder–Mead fallback.
    //
    // Expect
    // ------
    // - Without fallback: `GradientDimMismatch`.
    // - With fallback: θ̂ ≈ 2 from the Nelder–Mead solver.
    fn maximize_falls_back_to_nelder_mead_on_lbfgs_error() {
        // Arrange
        let tols = Tolerances::new(Some(1e-8), None, Some(100)).unwrap();
        let plain = MLEOptions::new(tols, LineSearcher::MoreThuente, false, None).unwrap();
        let with_nm = plain.clone().with_fallback(NelderMeadOptions::new(500, 1e-12, 0.5).unwrap());

        // Act
        let err = maximize(&BrokenGradient, array![0.0], &(), &plain).unwrap_err();
        let out = maximize(&BrokenGradient, array![0.0], &(), &with_nm).expect("fallback succeeds");

        // Assert
        assert!(matches!(err, OptError::GradientDimMismatch { .. }));
        assert_eq!(out.solver, SolverKind::NelderMead);
        assert_abs_diff_eq!(out.theta_hat[0], 2.0, epsilon = 1e-3);
    }

    #[test]
    fn maximize_propagates_check_failure() {
        let f = ShiftedQuadratic { center: array![1.0, -2.0] };
        let err = maximize(&f, array![0.0], &(), &MLEOptions::default()).unwrap_err();
        assert!(matches!(err, OptError::GradientDimMismatch { expected: 2, found: 1 }));
    }
}
