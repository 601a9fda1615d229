//! Integration tests for verdant-portfolio.
//!
//! These exercise the public API end to end, covering the documented
//! behaviour of the validator, metrics, benchmark comparison, simulator and
//! the combined analysis.

use std::sync::atomic::AtomicBool;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal_macros::dec;
use verdant_portfolio::prelude::*;
use verdant_portfolio::{compare, compute_metrics};

// =============================================================================
// TEST DATA
// =============================================================================

fn nifty_holdings() -> Vec<Holding> {
    vec![
        Holding::new("500325", dec!(10), dec!(2450.50)),
        Holding::new("532540", dec!(5), dec!(3500)),
        Holding::new("500180", dec!(20), dec!(1600.25)),
        Holding::new("500209", dec!(15), dec!(1480)),
        Holding::new("532174", dec!(8), dec!(960.40)),
    ]
}

fn uniform_scores(n: usize, score: f64) -> Vec<f64> {
    vec![score; n]
}

fn simulator(config: SimulationConfig) -> MonteCarloSimulator {
    MonteCarloSimulator::new(BaselineReturnModel::STANDARD, config)
}

/// Compounded annual return of the baseline drift, in percent.
fn expected_compounded_mean(annual_mean: f64, days: usize) -> f64 {
    ((1.0 + annual_mean / days as f64).powi(days as i32) - 1.0) * 100.0
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_weights_sum_to_one() {
    let holdings = nifty_holdings();
    let scores = uniform_scores(holdings.len(), 60.0);
    let portfolio = validate(&holdings, &scores).unwrap();

    let weights = portfolio.weights();
    assert_eq!(weights.len(), holdings.len());
    assert_abs_diff_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    assert!(weights.iter().all(|w| *w > 0.0));
}

#[test]
fn test_empty_portfolio_error() {
    assert_eq!(validate(&[], &[]), Err(PortfolioError::EmptyPortfolio));
    assert_eq!(analyze(&[], &[]), Err(PortfolioError::EmptyPortfolio));
}

#[test]
fn test_score_mismatch_error() {
    let holdings = nifty_holdings();
    let err = validate(&holdings, &[70.0, 80.0]).unwrap_err();
    assert_eq!(
        err,
        PortfolioError::ScoreMismatch {
            holdings: 5,
            scores: 2
        }
    );
    assert!(err.is_validation());
}

#[test]
fn test_invalid_holding_error() {
    let mut holdings = nifty_holdings();
    holdings[2].shares = dec!(0);
    let scores = uniform_scores(holdings.len(), 60.0);

    match validate(&holdings, &scores) {
        Err(PortfolioError::InvalidHolding { id, .. }) => assert_eq!(id, "500180"),
        other => panic!("expected InvalidHolding, got {other:?}"),
    }
}

#[test]
fn test_degenerate_value_error() {
    // Each factor is positive, but the product is below Decimal's 28-digit scale.
    let tiny = vec![Holding::new(
        "A",
        dec!(0.000000000000001),
        dec!(0.000000000000001),
    )];
    let err = validate(&tiny, &[50.0]).unwrap_err();
    assert!(matches!(err, PortfolioError::DegenerateValue { .. }));
    assert!(err.is_validation());
    assert_eq!(analyze(&tiny, &[50.0]).unwrap_err(), err);

    let huge = vec![
        Holding::new("A", rust_decimal::Decimal::MAX, dec!(1)),
        Holding::new("B", dec!(10), dec!(10)),
    ];
    let err = validate(&huge, &[50.0, 50.0]).unwrap_err();
    assert!(matches!(err, PortfolioError::DegenerateValue { .. }));
    assert!(err.is_validation());
}

// =============================================================================
// METRICS
// =============================================================================

#[test]
fn test_baseline_metrics() {
    let holdings = nifty_holdings();
    let metrics = compute_metrics(&holdings, &uniform_scores(holdings.len(), 55.0)).unwrap();

    assert_relative_eq!(metrics.expected_return, 12.0);
    assert_relative_eq!(metrics.volatility, 15.0);
    assert_relative_eq!(metrics.sharpe_ratio, 0.467);
    assert_relative_eq!(metrics.var_95, -24.68);
}

#[test]
fn test_esg_adjusted_return_tiers() {
    let holdings = nifty_holdings();
    let n = holdings.len();
    let cases = [(85.0, 17.0), (75.0, 15.5), (65.0, 14.0), (40.0, 12.0)];

    for (avg_esg, expected) in cases {
        let metrics = compute_metrics(&holdings, &uniform_scores(n, avg_esg)).unwrap();
        assert_relative_eq!(metrics.esg_adjusted_return, expected);
    }
}

#[test]
fn test_metrics_do_not_depend_on_weights() {
    let scores = [80.0, 80.0];
    let balanced = vec![
        Holding::new("A", dec!(10), dec!(100)),
        Holding::new("B", dec!(10), dec!(100)),
    ];
    let skewed = vec![
        Holding::new("A", dec!(1000), dec!(100)),
        Holding::new("B", dec!(1), dec!(1)),
    ];
    assert_eq!(
        compute_metrics(&balanced, &scores).unwrap(),
        compute_metrics(&skewed, &scores).unwrap()
    );
}

// =============================================================================
// BENCHMARK
// =============================================================================

#[test]
fn test_benchmark_comparison_reference_case() {
    let metrics = PortfolioMetrics {
        expected_return: 12.0,
        volatility: 15.0,
        sharpe_ratio: 0.467,
        var_95: -24.68,
        esg_adjusted_return: 17.0,
    };
    let comparison = compare(&metrics, 11.0);

    assert_relative_eq!(comparison.excess_return, 1.0);
    assert_relative_eq!(comparison.alpha, 6.0);
    assert!(comparison.outperformance);
}

// =============================================================================
// MONTE CARLO
// =============================================================================

#[test]
fn test_fixed_seed_runs_are_identical() {
    let holdings = nifty_holdings();
    let scores = uniform_scores(holdings.len(), 72.0);
    let portfolio = validate(&holdings, &scores).unwrap();

    let config = SimulationConfig::seeded(20_240_601)
        .with_simulations(1000)
        .with_trading_days(252);
    let a = simulator(config.clone()).run(&portfolio).unwrap();
    let b = simulator(config).run(&portfolio).unwrap();

    assert_eq!(a, b);
    // Serialized form is identical as well.
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_injected_generator_matches_seed() {
    let holdings = nifty_holdings();
    let scores = uniform_scores(holdings.len(), 50.0);
    let portfolio = validate(&holdings, &scores).unwrap();

    let seeded = simulator(SimulationConfig::seeded(77).with_simulations(200))
        .run(&portfolio)
        .unwrap();
    let injected = simulator(SimulationConfig::default().with_simulations(200))
        .run_with_rng(&portfolio, &mut StdRng::seed_from_u64(77))
        .unwrap();
    assert_eq!(seeded, injected);
}

#[test]
fn test_mean_converges_to_compounded_drift() {
    let holdings = nifty_holdings();
    let scores = uniform_scores(holdings.len(), 50.0);
    let portfolio = validate(&holdings, &scores).unwrap();
    let target = expected_compounded_mean(0.12, 252);

    for seed in [1_u64, 2, 3] {
        let result = simulator(SimulationConfig::seeded(seed).with_simulations(4000))
            .run(&portfolio)
            .unwrap();
        // Standard error of the mean is roughly 17 / sqrt(4000) ≈ 0.27pp.
        assert_abs_diff_eq!(result.mean_return, target, epsilon = 2.0);
    }
}

#[test]
fn test_prob_positive_monotone_in_drift() {
    let holdings = nifty_holdings();
    let scores = uniform_scores(holdings.len(), 50.0);
    let portfolio = validate(&holdings, &scores).unwrap();
    let config = SimulationConfig::seeded(99).with_simulations(2000);

    let mut previous = 0.0;
    for mean in [-0.10, 0.0, 0.05, 0.12, 0.25] {
        let model = BaselineReturnModel::new(mean, 0.15, 0.05).unwrap();
        let result = MonteCarloSimulator::new(model, config.clone())
            .run(&portfolio)
            .unwrap();
        assert!(
            result.prob_positive >= previous,
            "prob_positive fell from {previous} to {} at mean {mean}",
            result.prob_positive
        );
        previous = result.prob_positive;
    }
    assert!(previous > 50.0);
}

#[test]
fn test_simulation_data_shape() {
    let holdings = nifty_holdings();
    let scores = uniform_scores(holdings.len(), 65.0);
    let portfolio = validate(&holdings, &scores).unwrap();

    for days in [1, 21, 252] {
        let config = SimulationConfig::seeded(5)
            .with_simulations(300)
            .with_trading_days(days);
        let a = simulator(config.clone()).run(&portfolio).unwrap();
        let b = simulator(config).run(&portfolio).unwrap();

        assert_eq!(a.simulation_data.len(), days);
        assert!(a.simulation_data.iter().all(|v| v.is_finite()));
        assert_eq!(a.simulation_data, b.simulation_data);
    }
}

#[test]
fn test_esg_bonus_modes() {
    let holdings = nifty_holdings();
    let scores = uniform_scores(holdings.len(), 80.0);
    let portfolio = validate(&holdings, &scores).unwrap();
    let base = SimulationConfig::seeded(8).with_simulations(500);

    let informational = simulator(base.clone()).run(&portfolio).unwrap();
    let applied = simulator(base.with_esg_bonus_mode(EsgBonusMode::ApplyToDrift))
        .run(&portfolio)
        .unwrap();

    assert_relative_eq!(informational.esg_bonus_applied, 2.0);
    assert_relative_eq!(applied.esg_bonus_applied, 2.0);
    assert!(applied.mean_return > informational.mean_return);
}

#[test]
fn test_cancellation_discards_results() {
    let holdings = nifty_holdings();
    let scores = uniform_scores(holdings.len(), 50.0);
    let portfolio = validate(&holdings, &scores).unwrap();
    let cancel = AtomicBool::new(true);

    let result = simulator(SimulationConfig::seeded(1).with_parallel(false))
        .run_with_cancel(&portfolio, &cancel);
    assert_eq!(
        result,
        Err(PortfolioError::Cancelled {
            completed: 0,
            requested: 1000
        })
    );
}

#[test]
fn test_invalid_simulation_config() {
    let holdings = nifty_holdings();
    let scores = uniform_scores(holdings.len(), 50.0);
    let portfolio = validate(&holdings, &scores).unwrap();

    assert!(matches!(
        simulator(SimulationConfig::default().with_simulations(0)).run(&portfolio),
        Err(PortfolioError::InvalidConfig { .. })
    ));
    assert!(matches!(
        simulator(SimulationConfig::default().with_trading_days(0)).run(&portfolio),
        Err(PortfolioError::InvalidConfig { .. })
    ));
}

// =============================================================================
// FULL ANALYSIS
// =============================================================================

#[test]
fn test_full_analysis_with_score_book() {
    let holdings = nifty_holdings();
    let book: ScoreBook = [
        ("500325", 82.0),
        ("532540", 88.0),
        ("500180", 79.0),
        ("500209", 84.0),
    ]
    .into_iter()
    .collect();
    let scores = book.aligned(&holdings);
    assert_eq!(scores[4], 50.0);

    let result = PortfolioAnalyzer::standard()
        .with_simulation(SimulationConfig::seeded(42).with_simulations(500))
        .analyze(&holdings, &scores)
        .unwrap();

    // avg = (82 + 88 + 79 + 84 + 50) / 5 = 76.6
    assert_relative_eq!(result.metrics.esg_adjusted_return, 15.5);
    assert_relative_eq!(result.benchmark_comparison.alpha, 4.5);
    assert_relative_eq!(result.monte_carlo.esg_bonus_applied, 2.0);
    assert_eq!(result.monte_carlo.simulation_data.len(), 252);
}

#[test]
fn test_score_cache_feeds_analysis() {
    let holdings = nifty_holdings();
    let cache = ScoreCache::default();
    for h in &holdings {
        cache.insert(h.identifier.clone(), 90.0);
    }
    let scores = cache.to_score_book().aligned(&holdings);

    let metrics = PortfolioAnalyzer::standard().compute(&holdings, &scores).unwrap();
    assert_relative_eq!(metrics.esg_adjusted_return, 17.0);
}

#[test]
fn test_analysis_result_serializes() {
    let holdings = nifty_holdings();
    let scores = uniform_scores(holdings.len(), 70.0);
    let result = PortfolioAnalyzer::standard()
        .with_simulation(SimulationConfig::seeded(3).with_simulations(100).with_trading_days(10))
        .analyze(&holdings, &scores)
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["metrics"]["var_95"], serde_json::json!(-24.68));
    assert_eq!(json["benchmark_comparison"]["outperformance"], serde_json::json!(true));
    assert_eq!(
        json["monte_carlo"]["simulation_data"].as_array().map(Vec::len),
        Some(10)
    );

    let back: AnalysisResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_forecast_with_injected_rng() {
    let mut a = StdRng::seed_from_u64(12);
    let mut b = StdRng::seed_from_u64(12);
    let sector: Sector = "Renewable Energy".parse().unwrap();

    let first = forecast_return(82.0, &sector, &mut a).unwrap();
    let second = forecast_return(82.0, &sector, &mut b).unwrap();
    assert_eq!(first, second);
    assert_relative_eq!(first.confidence_score, 86.0);
    assert_abs_diff_eq!(
        first.benchmark_spread,
        first.predicted_return - 11.0,
        epsilon = 0.011
    );
}
