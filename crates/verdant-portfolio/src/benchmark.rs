//! Benchmark comparison.
//!
//! Compares portfolio metrics against a reference index return:
//! - Excess return (expected return − benchmark)
//! - Alpha (ESG-adjusted return − benchmark)
//! - Outperformance flag
//!
//! # Example
//!
//! ```rust
//! use verdant_portfolio::benchmark::compare;
//! use verdant_portfolio::PortfolioMetrics;
//!
//! let metrics = PortfolioMetrics {
//!     expected_return: 12.0,
//!     volatility: 15.0,
//!     sharpe_ratio: 0.467,
//!     var_95: -24.68,
//!     esg_adjusted_return: 17.0,
//! };
//! let comparison = compare(&metrics, 11.0);
//! assert!(comparison.outperformance);
//! assert_eq!(comparison.alpha, 6.0);
//! ```

use crate::baseline::ReturnModel;
use crate::metrics::PortfolioMetrics;
use crate::statistics::round_dp;
use serde::{Deserialize, Serialize};

/// Portfolio performance relative to a benchmark, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    /// Benchmark annual return (%).
    pub benchmark_return: f64,

    /// Portfolio expected return (%).
    pub portfolio_return: f64,

    /// Expected return minus benchmark, 2 dp.
    pub excess_return: f64,

    /// ESG-adjusted return minus benchmark, 2 dp.
    pub alpha: f64,

    /// True if excess return is strictly positive.
    pub outperformance: bool,
}

impl BenchmarkComparison {
    /// Returns true if the ESG premium alone turns underperformance into a
    /// positive alpha.
    #[must_use]
    pub fn esg_lifts_alpha(&self) -> bool {
        !self.outperformance && self.alpha > 0.0
    }
}

/// Compares metrics against an explicit benchmark return (%).
#[must_use]
pub fn compare(metrics: &PortfolioMetrics, benchmark_return: f64) -> BenchmarkComparison {
    let excess_return = metrics.expected_return - benchmark_return;
    let alpha = metrics.esg_adjusted_return - benchmark_return;

    BenchmarkComparison {
        benchmark_return: round_dp(benchmark_return, 2),
        portfolio_return: round_dp(metrics.expected_return, 2),
        excess_return: round_dp(excess_return, 2),
        alpha: round_dp(alpha, 2),
        outperformance: excess_return > 0.0,
    }
}

/// Compares metrics against the model's default benchmark, or `benchmark_return`
/// when the caller supplies one.
#[must_use]
pub fn compare_with_model<M>(
    metrics: &PortfolioMetrics,
    model: &M,
    benchmark_return: Option<f64>,
) -> BenchmarkComparison
where
    M: ReturnModel + ?Sized,
{
    compare(
        metrics,
        benchmark_return.unwrap_or_else(|| model.benchmark_return_default()),
    )
}
