//! Portfolio-level return assumptions.
//!
//! A single calibrated annual return/volatility pair stands in for the whole
//! portfolio. Metrics and simulation both read it through [`ReturnModel`] so
//! they always agree, and so a per-security model can replace it later
//! without touching their contracts.

use crate::error::{PortfolioError, PortfolioResult};
use serde::{Deserialize, Serialize};

/// Z-score for one-tailed 95% confidence.
pub const Z_SCORE_95: f64 = 1.645;

/// ESG score assumed for a holding the scoring service has not rated.
pub const DEFAULT_ESG_SCORE: f64 = 50.0;

/// Average ESG score from which the simulator reports a bonus.
pub const SIMULATION_BONUS_THRESHOLD: f64 = 70.0;

/// Bonus reported by the simulator, in percentage points.
pub const SIMULATION_BONUS_PCT: f64 = 2.0;

/// Source of the assumed portfolio return distribution.
pub trait ReturnModel {
    /// Expected annual return as a fraction (0.12 = 12%).
    fn annual_mean_return(&self) -> f64;

    /// Annual volatility as a fraction.
    fn annual_volatility(&self) -> f64;

    /// Annual risk-free rate as a fraction.
    fn risk_free_rate(&self) -> f64;

    /// Benchmark return in percent used when the caller supplies none.
    fn benchmark_return_default(&self) -> f64;

    /// Z-score used for the parametric 95% VaR.
    fn var_z_score(&self) -> f64 {
        Z_SCORE_95
    }

    /// ESG premium (as a fraction) earned by a given average ESG score.
    fn esg_premium(&self, avg_esg: f64) -> f64 {
        esg_premium(avg_esg)
    }

    /// Daily drift and volatility for a year of `trading_days` steps, with
    /// `drift_bonus` (an annual fraction) added to the mean.
    fn daily_parameters(&self, trading_days: usize, drift_bonus: f64) -> (f64, f64) {
        let days = trading_days as f64;
        (
            (self.annual_mean_return() + drift_bonus) / days,
            self.annual_volatility() / days.sqrt(),
        )
    }
}

/// ESG premium tier table.
///
/// | avg ESG | premium |
/// |---------|---------|
/// | ≥ 80    | 5.0%    |
/// | ≥ 70    | 3.5%    |
/// | ≥ 60    | 2.0%    |
/// | below   | 0       |
#[must_use]
pub fn esg_premium(avg_esg: f64) -> f64 {
    if avg_esg >= 80.0 {
        0.05
    } else if avg_esg >= 70.0 {
        0.035
    } else if avg_esg >= 60.0 {
        0.02
    } else {
        0.0
    }
}

/// Bonus the simulator reports for a given average ESG score, in percent.
#[must_use]
pub fn simulation_esg_bonus(avg_esg: f64) -> f64 {
    if avg_esg >= SIMULATION_BONUS_THRESHOLD {
        SIMULATION_BONUS_PCT
    } else {
        0.0
    }
}

/// The shipped calibrated baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineReturnModel {
    /// Expected annual return as a fraction.
    pub annual_mean_return: f64,

    /// Annual volatility as a fraction.
    pub annual_volatility: f64,

    /// Annual risk-free rate as a fraction.
    pub risk_free_rate: f64,

    /// Default benchmark return, in percent.
    pub benchmark_return_default: f64,

    /// VaR z-score.
    pub var_z_score: f64,
}

impl BaselineReturnModel {
    /// μ = 12%, σ = 15%, r_f = 5%, benchmark 11%.
    pub const STANDARD: Self = Self {
        annual_mean_return: 0.12,
        annual_volatility: 0.15,
        risk_free_rate: 0.05,
        benchmark_return_default: 11.0,
        var_z_score: Z_SCORE_95,
    };

    /// Creates a model from explicit annual parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidConfig`] if any value is non-finite or
    /// volatility is negative.
    pub fn new(
        annual_mean_return: f64,
        annual_volatility: f64,
        risk_free_rate: f64,
    ) -> PortfolioResult<Self> {
        Self {
            annual_mean_return,
            annual_volatility,
            risk_free_rate,
            ..Self::STANDARD
        }
        .checked()
    }

    /// Sets the default benchmark return (percent).
    #[must_use]
    pub fn with_benchmark_return(mut self, benchmark: f64) -> Self {
        self.benchmark_return_default = benchmark;
        self
    }

    /// Sets the VaR z-score.
    #[must_use]
    pub fn with_var_z_score(mut self, z: f64) -> Self {
        self.var_z_score = z;
        self
    }

    /// Validates every parameter, returning the model unchanged if usable.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidConfig`] naming the first bad field.
    pub fn checked(self) -> PortfolioResult<Self> {
        let fields = [
            ("annual_mean_return", self.annual_mean_return),
            ("annual_volatility", self.annual_volatility),
            ("risk_free_rate", self.risk_free_rate),
            ("benchmark_return_default", self.benchmark_return_default),
            ("var_z_score", self.var_z_score),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(PortfolioError::invalid_config(*field, "must be finite"));
        }
        if self.annual_volatility < 0.0 {
            return Err(PortfolioError::invalid_config(
                "annual_volatility",
                "cannot be negative",
            ));
        }
        if self.annual_mean_return <= -1.0 {
            return Err(PortfolioError::invalid_config(
                "annual_mean_return",
                "must be greater than -100%",
            ));
        }
        Ok(self)
    }
}

impl Default for BaselineReturnModel {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl ReturnModel for BaselineReturnModel {
    fn annual_mean_return(&self) -> f64 {
        self.annual_mean_return
    }

    fn annual_volatility(&self) -> f64 {
        self.annual_volatility
    }

    fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    fn benchmark_return_default(&self) -> f64 {
        self.benchmark_return_default
    }

    fn var_z_score(&self) -> f64 {
        self.var_z_score
    }
}

/// Arithmetic mean of ESG scores, or the default score if there are none.
#[must_use]
pub fn average_esg(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return DEFAULT_ESG_SCORE;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}
