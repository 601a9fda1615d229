//! Monte Carlo simulation of annual portfolio outcomes.
//!
//! Each trial draws `trading_days` i.i.d. normal daily returns with
//! `daily_mean = μ / days` and `daily_sigma = σ / √days`, compounds them into
//! a cumulative return path, and records the final value as that trial's
//! annual return.
//!
//! # Reproducibility
//!
//! A master [`StdRng`] (seeded from [`SimulationConfig::seed`] or OS entropy)
//! draws one seed per trial up front; each trial then owns an independent
//! generator. The output under a fixed seed is therefore identical whether
//! trials run sequentially or on the rayon pool.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::baseline::{simulation_esg_bonus, BaselineReturnModel, ReturnModel};
use crate::error::{ensure_finite, PortfolioError, PortfolioResult};
use crate::statistics::{percentile_sorted, round_dp, SampleSummary};
use crate::types::{EsgBonusMode, SimulationConfig};
use crate::validation::ValidatedPortfolio;

/// Distribution of simulated annual outcomes, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    /// Mean annual return (%), 2 dp.
    pub mean_return: f64,

    /// Population standard deviation of annual returns (%), 2 dp.
    pub std_dev: f64,

    /// Worst trial (%), 2 dp.
    pub min_return: f64,

    /// Best trial (%), 2 dp.
    pub max_return: f64,

    /// 5th percentile (%), 2 dp.
    pub percentile_5: f64,

    /// 95th percentile (%), 2 dp.
    pub percentile_95: f64,

    /// Share of trials ending above zero (%), 2 dp.
    pub prob_positive: f64,

    /// ESG bonus in percentage points. Whether it moved the distribution
    /// depends on [`EsgBonusMode`].
    pub esg_bonus_applied: f64,

    /// Pointwise median cumulative return path (%), one point per trading
    /// day, 4 dp.
    pub simulation_data: Vec<f64>,
}

/// Runs Monte Carlo trials against a return model.
#[derive(Debug, Clone)]
pub struct MonteCarloSimulator<M = BaselineReturnModel> {
    model: M,
    config: SimulationConfig,
}

impl Default for MonteCarloSimulator<BaselineReturnModel> {
    fn default() -> Self {
        Self::new(BaselineReturnModel::STANDARD, SimulationConfig::default())
    }
}

impl<M: ReturnModel> MonteCarloSimulator<M> {
    /// Creates a simulator.
    #[must_use]
    pub fn new(model: M, config: SimulationConfig) -> Self {
        Self { model, config }
    }

    /// The return model in use.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The simulation configuration in use.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs the simulation with a master generator built from the configured
    /// seed, or from OS entropy when no seed is set.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidConfig`] for unusable parameters and
    /// [`PortfolioError::Numeric`] if a statistic is non-finite.
    pub fn run(&self, portfolio: &ValidatedPortfolio<'_>) -> PortfolioResult<MonteCarloResult> {
        let mut rng = self.master_rng();
        self.execute(portfolio, &mut rng, None)
    }

    /// Runs the simulation drawing trial seeds from the caller's generator.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_with_rng<R>(
        &self,
        portfolio: &ValidatedPortfolio<'_>,
        rng: &mut R,
    ) -> PortfolioResult<MonteCarloResult>
    where
        R: RngCore + ?Sized,
    {
        self.execute(portfolio, rng, None)
    }

    /// Runs the simulation, abandoning it if `cancel` becomes true.
    ///
    /// The flag is checked before every trial. Partial results are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Cancelled`] when the flag is observed, or
    /// any error [`run`](Self::run) can return.
    pub fn run_with_cancel(
        &self,
        portfolio: &ValidatedPortfolio<'_>,
        cancel: &AtomicBool,
    ) -> PortfolioResult<MonteCarloResult> {
        let mut rng = self.master_rng();
        self.execute(portfolio, &mut rng, Some(cancel))
    }

    fn master_rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn execute<R>(
        &self,
        portfolio: &ValidatedPortfolio<'_>,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> PortfolioResult<MonteCarloResult>
    where
        R: RngCore + ?Sized,
    {
        self.config.check()?;

        let n = self.config.n_simulations;
        let days = self.config.trading_days;

        let esg_bonus = simulation_esg_bonus(portfolio.average_esg());
        let drift_bonus = match self.config.esg_bonus_mode {
            EsgBonusMode::Informational => 0.0,
            EsgBonusMode::ApplyToDrift => esg_bonus / 100.0,
        };
        if esg_bonus > 0.0 && self.config.esg_bonus_mode == EsgBonusMode::Informational {
            tracing::debug!(esg_bonus, "ESG bonus reported but not applied to simulated drift");
        }

        let (daily_mean, daily_sigma) = self.model.daily_parameters(days, drift_bonus);
        let daily = Normal::new(daily_mean, daily_sigma).map_err(|e| {
            PortfolioError::invalid_config("annual_volatility", e.to_string())
        })?;

        let seeds: Vec<u64> = (0..n).map(|_| rng.next_u64()).collect();

        tracing::debug!(
            n_simulations = n,
            trading_days = days,
            daily_mean,
            daily_sigma,
            parallel = self.config.should_parallelize(n),
            "starting Monte Carlo simulation"
        );

        let paths = self.simulate_paths(&seeds, days, &daily, cancel)?;
        summarize(&paths, days, esg_bonus)
    }

    fn simulate_paths(
        &self,
        seeds: &[u64],
        days: usize,
        daily: &Normal<f64>,
        cancel: Option<&AtomicBool>,
    ) -> PortfolioResult<Vec<Vec<f64>>> {
        let is_cancelled = || cancel.is_some_and(|flag| flag.load(Ordering::Relaxed));

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            if self.config.should_parallelize(seeds.len()) {
                let trials: Vec<Option<Vec<f64>>> = seeds
                    .par_iter()
                    .map(|&seed| (!is_cancelled()).then(|| simulate_path(seed, days, daily)))
                    .collect();
                let completed = trials.iter().filter(|t| t.is_some()).count();
                return trials
                    .into_iter()
                    .collect::<Option<Vec<_>>>()
                    .ok_or(PortfolioError::Cancelled {
                        completed,
                        requested: seeds.len(),
                    });
            }
        }

        let mut paths = Vec::with_capacity(seeds.len());
        for &seed in seeds {
            if is_cancelled() {
                return Err(PortfolioError::Cancelled {
                    completed: paths.len(),
                    requested: seeds.len(),
                });
            }
            paths.push(simulate_path(seed, days, daily));
        }
        Ok(paths)
    }
}

/// One trial: `path[t] = Π_{k≤t} (1 + r_k) − 1`.
fn simulate_path(seed: u64, days: usize, daily: &Normal<f64>) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut growth = 1.0;
    (0..days)
        .map(|_| {
            growth *= 1.0 + daily.sample(&mut rng);
            growth - 1.0
        })
        .collect()
}

/// Reduces trial paths to scalar statistics and the median path.
fn summarize(paths: &[Vec<f64>], days: usize, esg_bonus: f64) -> PortfolioResult<MonteCarloResult> {
    let annual: Vec<f64> = paths.iter().map(|p| p[days - 1] * 100.0).collect();
    let summary = SampleSummary::from_sample(&annual);

    let mut column = Vec::with_capacity(paths.len());
    let simulation_data = (0..days)
        .map(|t| {
            column.clear();
            column.extend(paths.iter().map(|p| p[t]));
            column.sort_by(f64::total_cmp);
            let median = percentile_sorted(&column, 50.0) * 100.0;
            ensure_finite("simulation_data", median).map(|m| round_dp(m, 4))
        })
        .collect::<PortfolioResult<Vec<f64>>>()?;

    Ok(MonteCarloResult {
        mean_return: round_dp(ensure_finite("mean_return", summary.mean)?, 2),
        std_dev: round_dp(ensure_finite("std_dev", summary.std_dev)?, 2),
        min_return: round_dp(ensure_finite("min_return", summary.min)?, 2),
        max_return: round_dp(ensure_finite("max_return", summary.max)?, 2),
        percentile_5: round_dp(ensure_finite("percentile_5", summary.percentile_5)?, 2),
        percentile_95: round_dp(ensure_finite("percentile_95", summary.percentile_95)?, 2),
        prob_positive: round_dp(ensure_finite("prob_positive", summary.prob_positive)?, 2),
        esg_bonus_applied: round_dp(esg_bonus, 2),
        simulation_data,
    })
}
