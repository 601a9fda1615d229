//! # Verdant Portfolio
//!
//! ESG-aware risk/return analytics for equity portfolios.
//!
//! Given a list of holdings and one ESG score per holding, this crate
//! produces point-estimate risk metrics, a comparison against a benchmark
//! index and a Monte Carlo distribution of annual outcomes.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: No I/O, no global state, every input explicit
//! - **Validate once**: Computation only accepts a [`ValidatedPortfolio`]
//! - **Replaceable model**: The return distribution sits behind [`ReturnModel`]
//! - **Explicit randomness**: Seeds and generators are passed in, never shared
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use verdant_portfolio::prelude::*;
//!
//! let holdings = vec![
//!     Holding::new("500325", dec!(10), dec!(2450)),
//!     Holding::new("532540", dec!(5), dec!(3500)),
//!     Holding::new("500180", dec!(20), dec!(1600)),
//! ];
//!
//! let mut book = ScoreBook::new();
//! book.insert("500325", 72.0);
//! book.insert("532540", 85.0);
//! let scores = book.aligned(&holdings); // 500180 falls back to 50
//!
//! let result = PortfolioAnalyzer::standard()
//!     .with_simulation(SimulationConfig::seeded(42))
//!     .analyze(&holdings, &scores)
//!     .unwrap();
//!
//! assert_eq!(result.metrics.sharpe_ratio, 0.467);
//! assert_eq!(result.metrics.var_95, -24.68);
//! assert!(result.benchmark_comparison.outperformance);
//! ```
//!
//! ## Module Overview
//!
//! - [`validation`] - Holding and score checks, [`ValidatedPortfolio`]
//! - [`baseline`] - Return model constants and the [`ReturnModel`] trait
//! - [`metrics`] - Expected return, volatility, Sharpe, VaR, ESG-adjusted return
//! - [`benchmark`] - Excess return and alpha against a benchmark
//! - [`simulation`] - Monte Carlo simulation
//! - [`analysis`] - The combined analysis
//! - [`scores`] / [`cache`] - ESG score lookup and TTL cache
//! - [`forecast`] - Heuristic single-holding return forecast
//!
//! ## Feature Flags
//!
//! - `parallel`: Run Monte Carlo trials on the rayon pool above a threshold

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

// Module declarations
pub mod analysis;
pub mod baseline;
pub mod benchmark;
pub mod cache;
pub mod error;
pub mod forecast;
pub mod metrics;
pub mod scores;
pub mod simulation;
pub mod statistics;
pub mod types;
pub mod validation;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

// Re-export main types
pub use types::{
    total_book_value, EsgBonusMode, Holding, SimulationConfig, DEFAULT_SIMULATIONS,
    DEFAULT_TRADING_DAYS,
};

// Re-export the model
pub use baseline::{
    average_esg, esg_premium, simulation_esg_bonus, BaselineReturnModel, ReturnModel,
    DEFAULT_ESG_SCORE, Z_SCORE_95,
};

// Re-export validation
pub use validation::{validate, ValidatedPortfolio, MAX_ESG_SCORE, MIN_ESG_SCORE};

// Re-export calculators
pub use benchmark::{compare, compare_with_model, BenchmarkComparison};
pub use metrics::{compute, PortfolioMetrics};
pub use simulation::{MonteCarloResult, MonteCarloSimulator};

// Re-export the orchestrator
pub use analysis::{analyze, compute_metrics, simulate, AnalysisResult, PortfolioAnalyzer};

// Re-export score sources and forecasting
pub use cache::{ScoreCache, DEFAULT_SCORE_TTL};
pub use forecast::{forecast_return, HeuristicForecaster, ReturnForecast, Sector};
pub use scores::ScoreBook;

/// Prelude module for convenient imports.
///
/// ```rust
/// use verdant_portfolio::prelude::*;
/// ```
pub mod prelude {
    pub use crate::analysis::{analyze, AnalysisResult, PortfolioAnalyzer};
    pub use crate::baseline::{BaselineReturnModel, ReturnModel};
    pub use crate::benchmark::BenchmarkComparison;
    pub use crate::cache::ScoreCache;
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::forecast::{forecast_return, ReturnForecast, Sector};
    pub use crate::metrics::PortfolioMetrics;
    pub use crate::scores::ScoreBook;
    pub use crate::simulation::{MonteCarloResult, MonteCarloSimulator};
    pub use crate::types::{EsgBonusMode, Holding, SimulationConfig};
    pub use crate::validation::{validate, ValidatedPortfolio};
}
