//! loglik_optimizer::builders — solver construction helpers.
//!
//! Purpose
//! -------
//! Hide `argmin`'s generic wiring behind small builders that apply crate
//! options to a solver:
//! - L-BFGS with Hager–Zhang or More–Thuente line search, configured from
//!   [`MLEOptions`] (memory, gradient and cost tolerances);
//! - Nelder–Mead with an axis-aligned initial simplex around `θ₀`,
//!   configured from [`NelderMeadOptions`].
//!
//! Conventions
//! -----------
//! - Builders never set the initial parameter vector for L-BFGS or any
//!   iteration limit; the runners in `run` own those runtime concerns.
//! - `argmin` configuration errors surface as [`OptError`] through
//!   `From<argmin::core::Error>`.
//!
//! [`OptError`]: crate::optimization::errors::OptError
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::{MLEOptions, NelderMeadOptions},
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, NelderMeadSolver, Theta,
        },
    },
};

/// Construct L-BFGS with Hager–Zhang line search.
///
/// Uses `opts.lbfgs_mem` (or [`DEFAULT_LBFGS_MEM`]) and applies any
/// tolerances via [`configure_lbfgs`].
///
/// # Errors
/// Returns an `OptError` when `argmin` rejects a tolerance.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsHagerZhang::new(HagerZhangLS::new(), mem), opts)
}

/// Construct L-BFGS with More–Thuente line search.
///
/// # Errors
/// Returns an `OptError` when `argmin` rejects a tolerance.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsMoreThuente::new(MoreThuenteLS::new(), mem), opts)
}

/// Apply optional gradient and cost-change tolerances to an L-BFGS solver.
///
/// A `None` tolerance leaves `argmin`'s default in place.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

/// Construct a Nelder–Mead solver whose simplex is `θ₀` plus one vertex per
/// coordinate, offset by `initial_step · max(|θ₀ᵢ|, 1)`.
///
/// # Errors
/// Returns an `OptError` when `argmin` rejects the standard-deviation
/// tolerance.
pub fn build_nelder_mead(theta0: &Theta, opts: &NelderMeadOptions) -> OptResult<NelderMeadSolver> {
    let mut simplex = Vec::with_capacity(theta0.len() + 1);
    simplex.push(theta0.clone());
    for i in 0..theta0.len() {
        let mut vertex = theta0.clone();
        vertex[i] += opts.initial_step * theta0[i].abs().max(1.0);
        simplex.push(vertex);
    }
    Ok(NelderMeadSolver::new(simplex).with_sd_tolerance(opts.sd_tol)?)
}
