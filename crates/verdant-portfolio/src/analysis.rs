//! Full portfolio analysis.
//!
//! Combines validation, point-estimate metrics, benchmark comparison and the
//! Monte Carlo simulation into a single [`AnalysisResult`]. Validation runs
//! once up front; if it fails nothing downstream is invoked.

use std::sync::atomic::AtomicBool;

use serde::{Deserialize, Serialize};

use crate::baseline::{BaselineReturnModel, ReturnModel};
use crate::benchmark::{compare_with_model, BenchmarkComparison};
use crate::error::PortfolioResult;
use crate::metrics::{self, PortfolioMetrics};
use crate::simulation::{MonteCarloResult, MonteCarloSimulator};
use crate::types::{Holding, SimulationConfig};
use crate::validation::{validate, ValidatedPortfolio};

/// Combined analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Point-estimate metrics.
    pub metrics: PortfolioMetrics,

    /// Metrics relative to the benchmark.
    pub benchmark_comparison: BenchmarkComparison,

    /// Simulated distribution of annual outcomes.
    pub monte_carlo: MonteCarloResult,
}

impl AnalysisResult {
    /// Difference between the simulated mean and the deterministic expected
    /// return, in percentage points.
    #[must_use]
    pub fn simulation_drift(&self) -> f64 {
        self.monte_carlo.mean_return - self.metrics.expected_return
    }
}

/// Runs analyses against one return model and simulation configuration.
///
/// # Example
///
/// ```rust
/// use rust_decimal_macros::dec;
/// use verdant_portfolio::{Holding, PortfolioAnalyzer, SimulationConfig};
///
/// let holdings = vec![
///     Holding::new("500325", dec!(10), dec!(2450)),
///     Holding::new("532540", dec!(5), dec!(3500)),
/// ];
/// let analyzer = PortfolioAnalyzer::standard()
///     .with_simulation(SimulationConfig::seeded(7).with_simulations(200));
///
/// let result = analyzer.analyze(&holdings, &[82.0, 78.0]).unwrap();
/// assert_eq!(result.metrics.esg_adjusted_return, 17.0);
/// assert_eq!(result.monte_carlo.simulation_data.len(), 252);
/// ```
#[derive(Debug, Clone)]
pub struct PortfolioAnalyzer<M = BaselineReturnModel> {
    model: M,
    simulation: SimulationConfig,
    benchmark_return: Option<f64>,
}

impl PortfolioAnalyzer<BaselineReturnModel> {
    /// Analyzer over [`BaselineReturnModel::STANDARD`] with default simulation
    /// settings.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(BaselineReturnModel::STANDARD)
    }
}

impl Default for PortfolioAnalyzer<BaselineReturnModel> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<M: ReturnModel + Clone> PortfolioAnalyzer<M> {
    /// Creates an analyzer over `model` with default simulation settings.
    #[must_use]
    pub fn new(model: M) -> Self {
        Self {
            model,
            simulation: SimulationConfig::default(),
            benchmark_return: None,
        }
    }

    /// Sets the simulation configuration.
    #[must_use]
    pub fn with_simulation(mut self, config: SimulationConfig) -> Self {
        self.simulation = config;
        self
    }

    /// Overrides the model's default benchmark return (%).
    #[must_use]
    pub fn with_benchmark_return(mut self, benchmark: f64) -> Self {
        self.benchmark_return = Some(benchmark);
        self
    }

    /// The return model in use.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The simulation configuration in use.
    #[must_use]
    pub fn simulation_config(&self) -> &SimulationConfig {
        &self.simulation
    }

    /// The benchmark return (%) comparisons are made against.
    #[must_use]
    pub fn benchmark_return(&self) -> f64 {
        self.benchmark_return
            .unwrap_or_else(|| self.model.benchmark_return_default())
    }

    /// Validates the inputs once, then computes metrics, the benchmark
    /// comparison and the simulation.
    ///
    /// # Errors
    ///
    /// Any validation error from [`validate`], returned before any other
    /// component runs, or a simulation/numeric error.
    pub fn analyze(&self, holdings: &[Holding], esg_scores: &[f64]) -> PortfolioResult<AnalysisResult> {
        let portfolio = validate(holdings, esg_scores)?;
        self.analyze_validated(&portfolio, None)
    }

    /// Like [`analyze`](Self::analyze), abandoning the simulation if `cancel`
    /// becomes true.
    ///
    /// # Errors
    ///
    /// See [`analyze`](Self::analyze); additionally
    /// [`PortfolioError::Cancelled`](crate::PortfolioError::Cancelled).
    pub fn analyze_with_cancel(
        &self,
        holdings: &[Holding],
        esg_scores: &[f64],
        cancel: &AtomicBool,
    ) -> PortfolioResult<AnalysisResult> {
        let portfolio = validate(holdings, esg_scores)?;
        self.analyze_validated(&portfolio, Some(cancel))
    }

    /// Point-estimate metrics only.
    ///
    /// # Errors
    ///
    /// Validation errors, or [`PortfolioError::Numeric`](crate::PortfolioError::Numeric).
    pub fn compute(&self, holdings: &[Holding], esg_scores: &[f64]) -> PortfolioResult<PortfolioMetrics> {
        let portfolio = validate(holdings, esg_scores)?;
        metrics::compute(&portfolio, &self.model)
    }

    /// Metrics and the benchmark comparison, without simulating.
    ///
    /// # Errors
    ///
    /// See [`compute`](Self::compute).
    pub fn compare(
        &self,
        holdings: &[Holding],
        esg_scores: &[f64],
    ) -> PortfolioResult<(PortfolioMetrics, BenchmarkComparison)> {
        let metrics = self.compute(holdings, esg_scores)?;
        let comparison = compare_with_model(&metrics, &self.model, self.benchmark_return);
        Ok((metrics, comparison))
    }

    /// Monte Carlo simulation only.
    ///
    /// # Errors
    ///
    /// Validation errors, or any error from [`MonteCarloSimulator::run`].
    pub fn simulate(&self, holdings: &[Holding], esg_scores: &[f64]) -> PortfolioResult<MonteCarloResult> {
        let portfolio = validate(holdings, esg_scores)?;
        self.simulator().run(&portfolio)
    }

    fn simulator(&self) -> MonteCarloSimulator<M> {
        MonteCarloSimulator::new(self.model.clone(), self.simulation.clone())
    }

    fn analyze_validated(
        &self,
        portfolio: &ValidatedPortfolio<'_>,
        cancel: Option<&AtomicBool>,
    ) -> PortfolioResult<AnalysisResult> {
        let metrics = metrics::compute(portfolio, &self.model)?;
        let benchmark_comparison = compare_with_model(&metrics, &self.model, self.benchmark_return);

        let simulator = self.simulator();
        let monte_carlo = match cancel {
            Some(flag) => simulator.run_with_cancel(portfolio, flag)?,
            None => simulator.run(portfolio)?,
        };

        tracing::info!(
            holdings = portfolio.len(),
            expected_return = metrics.expected_return,
            alpha = benchmark_comparison.alpha,
            mc_mean = monte_carlo.mean_return,
            "portfolio analysis complete"
        );

        Ok(AnalysisResult {
            metrics,
            benchmark_comparison,
            monte_carlo,
        })
    }
}

/// Analyzes a portfolio with the standard model and default simulation
/// settings.
///
/// Without a seed the simulated figures differ between calls.
///
/// # Errors
///
/// See [`PortfolioAnalyzer::analyze`].
pub fn analyze(holdings: &[Holding], esg_scores: &[f64]) -> PortfolioResult<AnalysisResult> {
    PortfolioAnalyzer::standard().analyze(holdings, esg_scores)
}

/// Computes point-estimate metrics with the standard model.
///
/// # Errors
///
/// See [`PortfolioAnalyzer::compute`].
pub fn compute_metrics(holdings: &[Holding], esg_scores: &[f64]) -> PortfolioResult<PortfolioMetrics> {
    PortfolioAnalyzer::standard().compute(holdings, esg_scores)
}

/// Runs the simulation with the standard model and `config`.
///
/// # Errors
///
/// See [`PortfolioAnalyzer::simulate`].
pub fn simulate(
    holdings: &[Holding],
    esg_scores: &[f64],
    config: &SimulationConfig,
) -> PortfolioResult<MonteCarloResult> {
    PortfolioAnalyzer::standard()
        .with_simulation(config.clone())
        .simulate(holdings, esg_scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortfolioError;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn holdings() -> Vec<Holding> {
        vec![
            Holding::new("500325", dec!(10), dec!(2450)),
            Holding::new("532540", dec!(5), dec!(3500)),
            Holding::new("500180", dec!(20), dec!(1600)),
        ]
    }

    fn analyzer() -> PortfolioAnalyzer {
        PortfolioAnalyzer::standard()
            .with_simulation(SimulationConfig::seeded(42).with_simulations(300))
    }

    #[test]
    fn test_analyze_assembles_all_parts() {
        let result = analyzer().analyze(&holdings(), &[85.0, 80.0, 90.0]).unwrap();

        assert_relative_eq!(result.metrics.expected_return, 12.0);
        assert_relative_eq!(result.metrics.esg_adjusted_return, 17.0);
        assert_relative_eq!(result.benchmark_comparison.benchmark_return, 11.0);
        assert_relative_eq!(result.benchmark_comparison.alpha, 6.0);
        assert!(result.benchmark_comparison.outperformance);
        assert_relative_eq!(result.monte_carlo.esg_bonus_applied, 2.0);
        assert_eq!(result.monte_carlo.simulation_data.len(), 252);
    }

    #[test]
    fn test_analyze_is_reproducible_with_seed() {
        let a = analyzer().analyze(&holdings(), &[60.0; 3]).unwrap();
        let b = analyzer().analyze(&holdings(), &[60.0; 3]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_validation_failure_is_fail_fast() {
        // An invalid simulation config would fail too, but validation runs first.
        let analyzer = PortfolioAnalyzer::standard()
            .with_simulation(SimulationConfig::default().with_simulations(0));

        assert_eq!(
            analyzer.analyze(&[], &[]),
            Err(PortfolioError::EmptyPortfolio)
        );
        assert!(matches!(
            analyzer.analyze(&holdings(), &[50.0]),
            Err(PortfolioError::ScoreMismatch { holdings: 3, scores: 1 })
        ));
    }

    #[test]
    fn test_benchmark_override() {
        let analyzer = analyzer().with_benchmark_return(13.0);
        assert_relative_eq!(analyzer.benchmark_return(), 13.0);

        let (metrics, comparison) = analyzer.compare(&holdings(), &[75.0; 3]).unwrap();
        assert_relative_eq!(metrics.esg_adjusted_return, 15.5);
        assert_relative_eq!(comparison.excess_return, -1.0);
        assert_relative_eq!(comparison.alpha, 2.5);
        assert!(comparison.esg_lifts_alpha());
    }

    #[test]
    fn test_partial_operations_match_full_analysis() {
        let analyzer = analyzer();
        let scores = [72.0, 85.0, 78.0];
        let full = analyzer.analyze(&holdings(), &scores).unwrap();

        assert_eq!(analyzer.compute(&holdings(), &scores).unwrap(), full.metrics);
        assert_eq!(analyzer.simulate(&holdings(), &scores).unwrap(), full.monte_carlo);
    }

    #[test]
    fn test_free_functions() {
        let metrics = compute_metrics(&holdings(), &[65.0; 3]).unwrap();
        assert_relative_eq!(metrics.esg_adjusted_return, 14.0);

        let config = SimulationConfig::seeded(3).with_simulations(50).with_trading_days(20);
        let mc = simulate(&holdings(), &[65.0; 3], &config).unwrap();
        assert_eq!(mc.simulation_data.len(), 20);
        assert_relative_eq!(mc.esg_bonus_applied, 0.0);

        let full = analyze(&holdings(), &[65.0; 3]).unwrap();
        assert_eq!(full.metrics, metrics);
    }

    #[test]
    fn test_cancelled_analysis() {
        let cancel = AtomicBool::new(true);
        let analyzer = PortfolioAnalyzer::standard()
            .with_simulation(SimulationConfig::seeded(1).with_parallel(false));
        assert!(matches!(
            analyzer.analyze_with_cancel(&holdings(), &[50.0; 3], &cancel),
            Err(PortfolioError::Cancelled { completed: 0, .. })
        ));
    }
}
