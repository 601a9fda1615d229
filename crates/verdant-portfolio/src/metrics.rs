//! Deterministic point-estimate risk/return metrics.

use crate::baseline::ReturnModel;
use crate::error::{ensure_finite, PortfolioResult};
use crate::statistics::round_dp;
use crate::validation::ValidatedPortfolio;
use serde::{Deserialize, Serialize};

/// Portfolio risk/return figures, all in percent except the Sharpe ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// Expected annual return (%), 2 dp.
    pub expected_return: f64,

    /// Annual volatility (%), 2 dp.
    pub volatility: f64,

    /// Sharpe ratio, 3 dp.
    pub sharpe_ratio: f64,

    /// One-tailed 95% parametric VaR (%), 2 dp. Negative = loss.
    pub var_95: f64,

    /// Expected return plus the ESG premium (%), 2 dp.
    pub esg_adjusted_return: f64,
}

/// Computes point-estimate metrics for a validated portfolio.
///
/// Book-value weights are computed but do not yet influence the result: the
/// return distribution is the model's portfolio-level assumption.
///
/// # Errors
///
/// Returns [`PortfolioError::Numeric`](crate::PortfolioError::Numeric) if any
/// figure is non-finite, which only a malformed model can cause.
pub fn compute<M>(portfolio: &ValidatedPortfolio<'_>, model: &M) -> PortfolioResult<PortfolioMetrics>
where
    M: ReturnModel + ?Sized,
{
    let weights = portfolio.weights();
    debug_assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);

    let mean = model.annual_mean_return();
    let vol = model.annual_volatility();

    let sharpe_ratio = if vol > 0.0 {
        (mean - model.risk_free_rate()) / vol
    } else {
        0.0
    };

    let var_95 = -model.var_z_score() * vol * 100.0;

    let avg_esg = portfolio.average_esg();
    let esg_adjusted = mean + model.esg_premium(avg_esg);

    tracing::debug!(
        holdings = weights.len(),
        avg_esg,
        premium = esg_adjusted - mean,
        "computed portfolio metrics"
    );

    Ok(PortfolioMetrics {
        expected_return: round_dp(ensure_finite("expected_return", mean * 100.0)?, 2),
        volatility: round_dp(ensure_finite("volatility", vol * 100.0)?, 2),
        sharpe_ratio: round_dp(ensure_finite("sharpe_ratio", sharpe_ratio)?, 3),
        var_95: round_dp(ensure_finite("var_95", var_95)?, 2),
        esg_adjusted_return: round_dp(
            ensure_finite("esg_adjusted_return", esg_adjusted * 100.0)?,
            2,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::BaselineReturnModel;
    use crate::types::Holding;
    use crate::validation::validate;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn metrics_for(scores: &[f64]) -> PortfolioMetrics {
        let holdings: Vec<Holding> = (0..scores.len())
            .map(|i| Holding::new(format!("H{i}"), dec!(10), dec!(100)))
            .collect();
        let validated = validate(&holdings, scores).unwrap();
        compute(&validated, &BaselineReturnModel::STANDARD).unwrap()
    }

    #[test]
    fn test_baseline_figures() {
        let m = metrics_for(&[40.0]);
        assert_relative_eq!(m.expected_return, 12.0);
        assert_relative_eq!(m.volatility, 15.0);
        assert_relative_eq!(m.sharpe_ratio, 0.467);
        assert_relative_eq!(m.var_95, -24.68);
    }

    #[test]
    fn test_esg_adjusted_tiers() {
        assert_relative_eq!(metrics_for(&[85.0]).esg_adjusted_return, 17.0);
        assert_relative_eq!(metrics_for(&[75.0]).esg_adjusted_return, 15.5);
        assert_relative_eq!(metrics_for(&[65.0]).esg_adjusted_return, 14.0);
        assert_relative_eq!(metrics_for(&[40.0]).esg_adjusted_return, 12.0);
    }

    #[test]
    fn test_average_across_holdings() {
        // mean(90, 70) = 80 -> top tier
        assert_relative_eq!(metrics_for(&[90.0, 70.0]).esg_adjusted_return, 17.0);
        // mean(90, 20) = 55 -> no premium
        assert_relative_eq!(metrics_for(&[90.0, 20.0]).esg_adjusted_return, 12.0);
    }

    #[test]
    fn test_zero_volatility_sharpe() {
        let model = BaselineReturnModel::new(0.12, 0.0, 0.05).unwrap();
        let holdings = vec![Holding::new("A", dec!(1), dec!(1))];
        let validated = validate(&holdings, &[50.0]).unwrap();
        let m = compute(&validated, &model).unwrap();
        assert_relative_eq!(m.sharpe_ratio, 0.0);
        assert_relative_eq!(m.var_95, 0.0);
    }

    #[test]
    fn test_custom_z_score() {
        let model = BaselineReturnModel::STANDARD.with_var_z_score(1.65);
        let holdings = vec![Holding::new("A", dec!(1), dec!(1))];
        let validated = validate(&holdings, &[50.0]).unwrap();
        assert_relative_eq!(compute(&validated, &model).unwrap().var_95, -24.75);
    }

    #[test]
    fn test_non_finite_model_rejected() {
        let model = BaselineReturnModel {
            annual_mean_return: f64::INFINITY,
            ..BaselineReturnModel::STANDARD
        };
        let holdings = vec![Holding::new("A", dec!(1), dec!(1))];
        let validated = validate(&holdings, &[50.0]).unwrap();
        assert!(matches!(
            compute(&validated, &model),
            Err(crate::PortfolioError::Numeric { .. })
        ));
    }
}
