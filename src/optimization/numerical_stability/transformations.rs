//! Numerical stability utilities.
//!
//! Provides safe implementations of the nonlinear transforms used to map
//! unconstrained optimizer coordinates into constrained model parameters.
//! The guarded strategies follow common ML libraries, using explicit cutoffs
//! (`x > 20.0`) to keep `f64` arithmetic in a well-conditioned regime.
//!
//! # Provided items
//! - [`STATIONARITY_MARGIN`]: a small ε buffer enforcing strict persistence
//!   bounds (e.g. α + β < 1 in GARCH models).
//! - [`safe_softplus`] / [`safe_softplus_inv`]: ℝ ↔ (0, ∞).
//! - [`safe_softmax`] / [`softmax_logits`]: ℝᵏ ↔ the open simplex scaled to
//!   total mass `1 − STATIONARITY_MARGIN`, with an implicit slack weight.
//! - [`bounded_unit`] / [`bounded_unit_inv`]: ℝ ↔ (−1 + margin, 1 − margin).
//! - [`EIGEN_EPS`]: eigenvalue floor for pseudoinverses.

/// Safety margin for strict stationarity.
///
/// Persistence constraints such as α + β < 1 are enforced strictly by
/// reserving this buffer, so the recursion always runs inside the stable
/// region.
pub const STATIONARITY_MARGIN: f64 = 1e-6;

/// Eigenvalues at or below this value are treated as zero when forming
/// pseudoinverses.
pub const EIGEN_EPS: f64 = 1e-10;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For sufficiently large `x`, `softplus(x) ≈ x`.
/// - Otherwise, it falls back to `ln1p(exp(x))`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: returns `t = ln(exp(x) - 1)`.
///
/// `x` must be finite and `> 0`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Map logits to stationarity-scaled simplex weights.
///
/// With `k = logits.len()` and an implicit slack logit fixed at `0`,
///
/// `out[i] = (1 − STATIONARITY_MARGIN) · exp(l_i) / (1 + Σ_j exp(l_j))`,
///
/// so `Σ out ≤ 1 − STATIONARITY_MARGIN`. The max-shift keeps the
/// exponentials bounded; weights whose logit trails the largest by more
/// than the `f64` exponent range are floored at `f64::MIN_POSITIVE`, so
/// every weight stays strictly positive.
///
/// Panics if `out.len() != logits.len()`.
pub fn safe_softmax(logits: &[f64], out: &mut [f64]) {
    assert_eq!(logits.len(), out.len(), "softmax output length must match logits");
    let max = logits.iter().copied().fold(0.0_f64, f64::max);
    let slack = (-max).exp();
    let mut denom = slack;
    for (o, &l) in out.iter_mut().zip(logits) {
        *o = (l - max).exp().max(f64::MIN_POSITIVE);
        denom += *o;
    }
    let scale = (1.0 - STATIONARITY_MARGIN) / denom;
    for o in out.iter_mut() {
        *o *= scale;
    }
}

/// Inverse of [`safe_softmax`]: logits reproducing the given weights.
///
/// Weights must be strictly positive with `Σ w < 1 − STATIONARITY_MARGIN`;
/// the implied slack is floored at `1e-8` so the inverse stays finite for
/// starting values close to the boundary.
pub fn softmax_logits(weights: &[f64]) -> Vec<f64> {
    let mass = 1.0 - STATIONARITY_MARGIN;
    let slack = (mass - weights.iter().sum::<f64>()).max(1e-8);
    weights.iter().map(|&w| (w.max(1e-12) / slack).ln()).collect()
}

/// Map ℝ → (−1 + margin, 1 − margin) via a scaled `tanh`.
pub fn bounded_unit(x: f64) -> f64 {
    (1.0 - STATIONARITY_MARGIN) * x.tanh()
}

/// Inverse of [`bounded_unit`]; the input is clamped inside the open range.
pub fn bounded_unit_inv(y: f64) -> f64 {
    let limit = 1.0 - STATIONARITY_MARGIN;
    let u = (y / limit).clamp(-1.0 + 1e-12, 1.0 - 1e-12);
    u.atanh()
}
