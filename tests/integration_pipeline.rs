//! Integration tests for volatility estimation, regime detection and the
//! analysis pipeline.
//!
//! Purpose
//! -------
//! - Check that the estimators recover known structure from simulated data:
//!   GARCH(1,1) parameters and a persistent two-state market regime.
//! - Run the full per-asset pipeline and verify the report it returns,
//!   including partial results when some fits fail.
//!
//! Coverage
//! --------
//! - `garch::fit_garch` on long simulated samples, all variants.
//! - `regime::detect_regimes` transition recovery.
//! - `pipeline::{analyze_asset, analyze_assets}`: fits, diagnostics,
//!   forecasts, evaluation, failure records, fail-fast data errors,
//!   determinism and serialization.
//!
//! Exclusions
//! ----------
//! - Building blocks (recursions, forward–backward, Ljung–Box arithmetic,
//!   option validation) are covered by unit tests.
use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use rand::{Rng, SeedableRng, distributions::Distribution, rngs::StdRng};
use statrs::distribution::Normal;
use tracing_subscriber::EnvFilter;
use volregime::{
    errors::ErrorKind,
    garch::{GarchOptions, GarchVariant, fit_garch},
    pipeline::{AnalysisConfig, Component, analyze_asset, analyze_assets},
    regime::{DEFAULT_SEED, HmmOptions, detect_regimes},
    series::ReturnSeries,
};

// ---- Helper methods ----

/// Install a test-friendly subscriber once; `RUST_LOG` controls verbosity.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn daily_series(values: Vec<f64>) -> ReturnSeries {
    let start = NaiveDate::from_ymd_opt(2012, 1, 2).expect("valid date");
    let pairs =
        values.into_iter().enumerate().map(|(i, r)| (start + chrono::Days::new(i as u64), r));
    ReturnSeries::from_pairs(pairs).expect("finite, increasing series")
}

/// Purpose
/// -------
/// Simulate GARCH(1,1) log returns in fraction units.
///
/// With `ω = 1e-6` in fraction² units the percent-scaled model has
/// `ω = 0.01`, `α = 0.08`, `β = 0.90`. The recursion starts at the
/// unconditional variance.
fn simulate_garch(n: usize, seed: u64) -> ReturnSeries {
    let (omega, alpha, beta) = (1e-6, 0.08, 0.90);
    let normal = Normal::new(0.0, 1.0).expect("standard normal");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut var: f64 = omega / (1.0 - alpha - beta);
    let values = (0..n)
        .map(|_| {
            let r = var.sqrt() * normal.sample(&mut rng);
            var = omega + alpha * r * r + beta * var;
            r
        })
        .collect();
    daily_series(values)
}

/// Purpose
/// -------
/// Simulate a two-state Markov-switching market.
///
/// State 0 is calm (mean 0, 0.4% daily volatility); state 1 is a selloff
/// (mean -3%, 0.8% volatility). Each state persists with probability
/// `stay`. The states differ in level as well as in volatility: with a
/// pure variance mixture the Gaussian `(r, r²)` emission splits small
/// high-regime draws into the calm state and the fitted high-regime
/// persistence collapses.
fn simulate_regimes(n: usize, stay: f64, seed: u64) -> ReturnSeries {
    let means = [0.0, -0.03];
    let vols = [0.004, 0.008];
    let normal = Normal::new(0.0, 1.0).expect("standard normal");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = 0usize;
    let values = (0..n)
        .map(|_| {
            if rng.r#gen::<f64>() > stay {
                state = 1 - state;
            }
            means[state] + vols[state] * normal.sample(&mut rng)
        })
        .collect();
    daily_series(values)
}

// ---- Estimators ----

#[test]
// Purpose
// -------
// Maximum likelihood recovers the parameters of a simulated GARCH(1,1).
//
// Given
// -----
// - 3000 returns with percent-scale ω = 0.01, α = 0.08, β = 0.90.
//
// Expect
// ------
// - ω̂, α̂, β̂ within ±0.03 of the truth and α̂ + β̂ < 1.
// - A strictly positive variance path aligned with the input.
// - Finite standard errors for every parameter.
fn garch_recovers_simulated_parameters() {
    // Arrange
    init_tracing();
    let series = simulate_garch(3000, 2024);

    // Act
    let fit = fit_garch(GarchVariant::Garch, &series, &GarchOptions::default())
        .expect("GARCH(1,1) fit should succeed on a long simulated sample");

    // Assert
    assert_abs_diff_eq!(fit.params.omega, 0.01, epsilon = 0.03);
    assert_abs_diff_eq!(fit.params.alpha, 0.08, epsilon = 0.03);
    assert_abs_diff_eq!(fit.params.beta, 0.90, epsilon = 0.03);
    assert!(fit.params.alpha + fit.params.beta < 1.0);
    assert_eq!(fit.path.len(), series.len());
    assert!(fit.path.iter().all(|p| p.volatility_pct > 0.0));
    let se = fit.std_errors.as_ref().expect("standard errors at an interior optimum");
    assert_eq!(se.classical.len(), GarchVariant::Garch.n_params());
    assert!(se.classical.iter().chain(&se.robust).all(|s| s.is_finite() && *s > 0.0));
}

#[test]
// Purpose
// -------
// Every variant fits the same sample with positive variances and forecasts.
fn every_variant_produces_positive_variance_path() {
    init_tracing();
    let series = simulate_garch(2000, 11);
    for variant in GarchVariant::ALL {
        let fit = fit_garch(variant, &series, &GarchOptions::default())
            .unwrap_or_else(|err| panic!("{variant} fit failed: {err}"));
        assert!(fit.path.iter().all(|p| p.volatility_pct > 0.0 && p.volatility_pct.is_finite()));
        assert!(fit.forecast_volatility_pct() > 0.0);
        assert_eq!(fit.std_residuals.len(), series.len());
        assert_eq!(fit.last_date, series.last_date());
    }
}

#[test]
// Purpose
// -------
// A persistent two-state market yields a persistent transition matrix with
// the calm regime as state 0.
//
// Given
// -----
// - 2000 returns, calm (0%, 0.4% vol) vs selloff (-3%, 0.8% vol), stay
//   probability 0.98.
//
// Expect
// ------
// - Diagonal entries above 0.8, rows summing to one.
// - State 0 has the lower return volatility.
fn hmm_recovers_persistent_regimes() {
    // Arrange
    init_tracing();
    let series = simulate_regimes(2000, 0.98, 5);

    // Act
    let analysis = detect_regimes(&series, &HmmOptions::default(), DEFAULT_SEED)
        .expect("well-separated regimes should fit");

    // Assert
    let a = analysis.transition_matrix();
    for (k, row) in a.iter().enumerate() {
        assert!(row[k] > 0.8, "diagonal {k} = {}", row[k]);
        assert_abs_diff_eq!(row.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }
    let low = analysis.summaries[0].return_volatility.expect("state 0 occupied");
    let high = analysis.summaries[1].return_volatility.expect("state 1 occupied");
    assert!(low < high);
}

// ---- Pipeline ----

#[test]
// Purpose
// -------
// A full analysis returns consistent fits, diagnostics, forecasts and
// evaluation rows.
//
// Given
// -----
// - 1500 simulated GARCH returns and the default configuration.
//
// Expect
// ------
// - Every variant is either fitted or listed as a recoverable failure.
// - Each fit has diagnostics with a p-value in [0, 1] and one forecast.
// - Each evaluation row scores |forecast − anchor| with MAE = RMSE ≥ 0.
// - The report serializes with the documented field names.
fn analyze_asset_produces_complete_report() {
    // Arrange
    init_tracing();
    let series = simulate_garch(1500, 99);
    let config = AnalysisConfig::default();

    // Act
    let report = analyze_asset("SPY", &series, &config).expect("analysis should not abort");

    // Assert
    assert_eq!(report.n_obs, 1500);
    assert!(report.fit(GarchVariant::Garch).is_some());
    assert_eq!(report.fits.len() + report.failures.len(), 3 + usize::from(report.regime.is_none()));
    assert!(report.failures.iter().all(|f| f.kind.is_recoverable()));
    assert_eq!(report.realized.len(), series.len());
    assert!(report.realized[..4].iter().all(|p| p.realized_vol_pct.is_none()));
    assert!(report.realized_anchor_pct > 0.0);

    let evaluation = report.evaluation.as_ref().expect("at least one forecast");
    assert_eq!(evaluation.len(), report.fits.len());
    for fit in &report.fits {
        let diag = report.diagnostics_for(fit.variant).expect("diagnostics for each fit");
        assert!((0.0..=1.0).contains(&diag.ljung_box.p_value));
        assert_eq!(diag.qq.points.len(), series.len());

        let row = evaluation.get("SPY", fit.variant.name()).expect("row per fitted model");
        let expected = (fit.forecast_volatility_pct() - report.realized_anchor_pct).abs();
        assert_abs_diff_eq!(row.mae, expected, epsilon = 1e-12);
        assert_abs_diff_eq!(row.rmse, expected, epsilon = 1e-12);
    }
    assert_eq!(report.forecasts.len(), report.fits.len());

    if let Some(regime) = &report.regime {
        assert_eq!(regime.path.len(), series.len());
    }

    let json = serde_json::to_string(&report).expect("report serializes");
    assert!(json.contains("one_day_ahead_vol_forecast_pct"));
    assert!(json.contains("\"abs_err\""));
}

#[test]
// Purpose
// -------
// GARCH failures are recorded while the regime fit still completes.
//
// Given
// -----
// - A one-iteration optimizer budget without the Nelder–Mead fallback.
//
// Expect
// ------
// - No fits, one recoverable failure per variant, no diagnostics, no
//   forecasts and no evaluation.
// - The HMM result is present.
fn analyze_asset_reports_partial_failures() {
    // Arrange
    init_tracing();
    let series = simulate_regimes(800, 0.98, 17);
    let mut config = AnalysisConfig::default();
    config.garch.max_iter = 1;
    config.garch.nelder_mead_fallback = false;

    // Act
    let report = analyze_asset("EEM", &series, &config).expect("failures are recoverable");

    // Assert
    assert!(report.fits.is_empty());
    assert!(report.diagnostics.is_empty());
    assert!(report.forecasts.is_empty());
    assert!(report.evaluation.is_none());
    assert!(report.regime.is_some());
    assert!(!report.is_complete());
    let garch_failures: Vec<_> = report
        .failures
        .iter()
        .filter(|f| matches!(f.component, Component::Garch(_)))
        .collect();
    assert_eq!(garch_failures.len(), 3);
    for failure in garch_failures {
        assert_eq!(failure.asset, "EEM");
        assert!(failure.kind.is_recoverable());
        assert!(!failure.message.is_empty());
    }
}

#[test]
// Purpose
// -------
// Data problems abort the analysis with no partial report.
//
// Given
// -----
// - 8 returns with the default Ljung–Box lag of 10.
// - 50 returns, below the GARCH minimum of 100.
//
// Expect
// ------
// - Both analyses fail with a DataError.
fn analyze_asset_fails_fast_on_short_series() {
    init_tracing();
    let config = AnalysisConfig::default();
    for n in [8, 50] {
        let series = daily_series((0..n).map(|i| 0.01 * ((i % 5) as f64 - 2.0)).collect());
        let err = analyze_asset("SPY", &series, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data, "n = {n}: {err}");
    }
}

#[test]
// Purpose
// -------
// Two assets analyzed in parallel match their sequential analyses and
// pool into one evaluation tagged by asset.
fn analyze_assets_is_deterministic_and_pools_evaluations() {
    // Arrange
    init_tracing();
    let mut config = AnalysisConfig::default();
    config.variants = vec![GarchVariant::Garch, GarchVariant::GjrGarch];
    config.garch.std_errors = false;
    let assets = vec![
        ("SPY".to_string(), simulate_garch(1000, 1)),
        ("EEM".to_string(), simulate_garch(1000, 2)),
    ];

    // Act
    let portfolio = analyze_assets(&assets, &config).expect("analysis should not abort");
    let spy = analyze_asset("SPY", &assets[0].1, &config).expect("analysis should not abort");

    // Assert
    assert_eq!(portfolio.reports.len(), 2);
    assert_eq!(portfolio.report("SPY"), Some(&spy));
    let fitted: usize = portfolio.reports.iter().map(|r| r.fits.len()).sum();
    assert_eq!(portfolio.evaluation.len(), fitted);
    assert!(portfolio.evaluation.rows.windows(2).all(|w| w[0].asset <= w[1].asset));
    assert!(portfolio.evaluation.rows.iter().all(|r| r.mae >= 0.0 && r.rmse >= 0.0));
}
