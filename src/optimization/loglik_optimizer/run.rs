//! Solver runners: execute a configured `argmin` solver on an
//! [`ArgMinAdapter`] and turn the final state into an [`OptimOutcome`].
//!
//! With the `obs_slog` feature and `MLEOptions::verbose`, L-BFGS runs attach
//! `argmin`'s terminal slog observer and log the starting log-likelihood.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        traits::{NelderMeadOptions, SolverKind},
        types::NelderMeadSolver,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, IterState, Solver, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

type LbfgsState = IterState<Theta, Grad, (), (), (), f64>;

/// Run L-BFGS (either line search) from `theta0`.
///
/// `opts.tols.max_iter` caps the iterations; tolerances were applied when
/// the solver was built.
///
/// # Errors
/// `argmin` runtime failures (line search, cost errors raised by the model)
/// and outcome validation errors.
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, LbfgsState> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let max_iter = opts.tols.max_iter;
    let executor = Executor::new(problem, solver).configure(|state| {
        let state = state.param(theta0);
        match max_iter {
            Some(n) => state.max_iters(n as u64),
            None => state,
        }
    });
    #[cfg(feature = "obs_slog")]
    let executor = if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        executor.add_observer(observer, argmin::core::observers::ObserverMode::Always)
    } else {
        executor
    };

    let mut state = executor.run()?.state().clone();
    let grad = state.take_gradient();
    into_outcome(&mut state, grad, SolverKind::Lbfgs)
}

/// Run Nelder–Mead. The simplex built around `θ₀` is already inside
/// `solver`, so no starting parameter is set here.
///
/// # Errors
/// `argmin` runtime failures and outcome validation errors.
pub fn run_nelder_mead<F>(
    opts: &NelderMeadOptions, problem: ArgMinAdapter<'_, F>, solver: NelderMeadSolver,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
{
    let executor = Executor::new(problem, solver)
        .configure(|state| state.max_iters(opts.max_iter as u64));
    let mut state = executor.run()?.state().clone();
    into_outcome(&mut state, None, SolverKind::NelderMead)
}

// ---- Helper methods ----

/// Best parameter and its log-likelihood (the negated best cost).
fn into_outcome<G>(
    state: &mut IterState<Theta, G, (), (), (), f64>, grad: Option<Grad>, solver: SolverKind,
) -> OptResult<OptimOutcome> {
    OptimOutcome::new(
        state.take_best_param(),
        -state.get_best_cost(),
        state.get_termination_status().clone(),
        state.get_iter(),
        state.get_func_counts().clone(),
        grad,
        solver,
    )
}

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: LogLikelihood,
{
    let loglik0 = -problem.cost(theta0)?;
    let grad_norm = problem.gradient(theta0).ok().map(|g| g.l2_norm());
    tracing::info!(loglik0, ?grad_norm, "starting L-BFGS");
    Ok(())
}
