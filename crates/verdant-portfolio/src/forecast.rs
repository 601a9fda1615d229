//! Heuristic single-holding return forecast.
//!
//! `predicted = base + tier_premium(esg) * sector_multiplier + noise`, with
//! the noise drawn from `N(0, noise_std)` on the caller's generator.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};
use crate::statistics::round_dp;
use crate::validation::{MAX_ESG_SCORE, MIN_ESG_SCORE};

/// Industry sector of a holding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sector {
    /// Technology.
    Technology,
    /// Banking and financial services.
    Finance,
    /// Conventional energy.
    Energy,
    /// Renewable energy.
    RenewableEnergy,
    /// Healthcare.
    Healthcare,
    /// Consumer goods.
    #[default]
    Consumer,
    /// Manufacturing.
    Manufacturing,
    /// Any other sector, by name.
    Other(String),
}

impl Sector {
    /// Multiplier applied to the ESG premium.
    #[must_use]
    pub fn premium_multiplier(&self) -> f64 {
        match self {
            Self::Technology => 1.2,
            Self::Finance => 0.9,
            Self::Energy => 0.85,
            Self::RenewableEnergy => 1.3,
            Self::Healthcare => 1.1,
            Self::Consumer => 1.0,
            Self::Manufacturing => 0.95,
            Self::Other(_) => 1.0,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Technology => "Technology",
            Self::Finance => "Finance",
            Self::Energy => "Energy",
            Self::RenewableEnergy => "Renewable Energy",
            Self::Healthcare => "Healthcare",
            Self::Consumer => "Consumer",
            Self::Manufacturing => "Manufacturing",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        Ok(match key.as_str() {
            "technology" | "tech" => Self::Technology,
            "finance" | "financial" | "financials" => Self::Finance,
            "energy" => Self::Energy,
            "renewableenergy" | "renewables" => Self::RenewableEnergy,
            "healthcare" => Self::Healthcare,
            "consumer" => Self::Consumer,
            "manufacturing" => Self::Manufacturing,
            _ => Self::Other(s.trim().to_string()),
        })
    }
}

/// ESG premium (percentage points) before the sector multiplier.
#[must_use]
pub fn forecast_esg_premium(esg_score: f64) -> f64 {
    match esg_score {
        s if s >= 80.0 => 5.0,
        s if s >= 70.0 => 3.5,
        s if s >= 60.0 => 2.0,
        s if s >= 50.0 => 0.5,
        _ => -1.0,
    }
}

/// Forecast for one holding, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnForecast {
    /// Predicted annual return (%), 2 dp.
    pub predicted_return: f64,

    /// Predicted return minus the benchmark (%), 2 dp.
    pub benchmark_spread: f64,

    /// Confidence in the forecast, 0–95, 2 dp.
    pub confidence_score: f64,

    /// Name of the model that produced the forecast.
    pub model_used: String,
}

/// Heuristic return forecaster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicForecaster {
    /// Return before any ESG premium (%).
    pub base_return: f64,
    /// Benchmark the spread is measured against (%).
    pub benchmark_return: f64,
    /// Standard deviation of the additive noise (percentage points).
    pub noise_std: f64,
}

impl HeuristicForecaster {
    /// Name reported in [`ReturnForecast::model_used`].
    pub const MODEL_NAME: &'static str = "Heuristic";

    /// 8% base, 11% benchmark, 1.5pp noise.
    pub const STANDARD: Self = Self {
        base_return: 8.0,
        benchmark_return: 11.0,
        noise_std: 1.5,
    };

    /// Same parameters with the noise switched off.
    #[must_use]
    pub fn noiseless(mut self) -> Self {
        self.noise_std = 0.0;
        self
    }

    /// Forecasts the annual return of a holding.
    ///
    /// # Errors
    ///
    /// [`PortfolioError::InvalidScore`] if `esg_score` is non-finite or
    /// outside [0, 100].
    pub fn forecast<R>(&self, esg_score: f64, sector: &Sector, rng: &mut R) -> PortfolioResult<ReturnForecast>
    where
        R: Rng + ?Sized,
    {
        if !esg_score.is_finite() || !(MIN_ESG_SCORE..=MAX_ESG_SCORE).contains(&esg_score) {
            return Err(PortfolioError::InvalidScore {
                index: 0,
                value: esg_score.to_string(),
            });
        }

        let z: f64 = StandardNormal.sample(rng);
        let predicted = self.base_return
            + forecast_esg_premium(esg_score) * sector.premium_multiplier()
            + z * self.noise_std;
        let confidence = (70.0 + (esg_score - 50.0) * 0.5).min(95.0);

        tracing::debug!(esg_score, sector = %sector, predicted, "return forecast");

        Ok(ReturnForecast {
            predicted_return: round_dp(predicted, 2),
            benchmark_spread: round_dp(predicted - self.benchmark_return, 2),
            confidence_score: round_dp(confidence, 2),
            model_used: Self::MODEL_NAME.to_string(),
        })
    }
}

impl Default for HeuristicForecaster {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Forecasts with [`HeuristicForecaster::STANDARD`].
///
/// # Errors
///
/// See [`HeuristicForecaster::forecast`].
pub fn forecast_return<R>(esg_score: f64, sector: &Sector, rng: &mut R) -> PortfolioResult<ReturnForecast>
where
    R: Rng + ?Sized,
{
    HeuristicForecaster::STANDARD.forecast(esg_score, sector, rng)
}
