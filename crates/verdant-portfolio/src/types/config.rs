//! Configuration for Monte Carlo simulation.

use crate::error::{PortfolioError, PortfolioResult};
use serde::{Deserialize, Serialize};

/// Default number of simulated trials.
pub const DEFAULT_SIMULATIONS: usize = 1000;

/// Default number of trading days in a simulated year.
pub const DEFAULT_TRADING_DAYS: usize = 252;

/// How the simulator treats the ESG bonus it reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EsgBonusMode {
    /// Report `esg_bonus_applied` but leave the simulated distribution untouched.
    #[default]
    Informational,

    /// Add the bonus to the annual drift before deriving the daily mean.
    ApplyToDrift,
}

impl EsgBonusMode {
    /// Returns a human-readable name for the mode.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Informational => "Informational",
            Self::ApplyToDrift => "Apply To Drift",
        }
    }
}

/// Configuration for a Monte Carlo run.
///
/// Controls trial count, horizon, seeding, and parallelism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of independent trials.
    pub n_simulations: usize,

    /// Trading days per trial (one simulated year).
    pub trading_days: usize,

    /// Master seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,

    /// Treatment of the ESG bonus.
    pub esg_bonus_mode: EsgBonusMode,

    /// Enable parallel trials (requires the 'parallel' feature).
    pub parallel: bool,

    /// Minimum trial count to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_simulations: DEFAULT_SIMULATIONS,
            trading_days: DEFAULT_TRADING_DAYS,
            seed: None,
            esg_bonus_mode: EsgBonusMode::Informational,
            parallel: true,
            parallel_threshold: 2000,
        }
    }
}

impl SimulationConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Sets the number of trials.
    #[must_use]
    pub fn with_simulations(mut self, n: usize) -> Self {
        self.n_simulations = n;
        self
    }

    /// Sets the number of trading days per trial.
    #[must_use]
    pub fn with_trading_days(mut self, days: usize) -> Self {
        self.trading_days = days;
        self
    }

    /// Sets the master seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the ESG bonus mode.
    #[must_use]
    pub fn with_esg_bonus_mode(mut self, mode: EsgBonusMode) -> Self {
        self.esg_bonus_mode = mode;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Checks that trial count and horizon are usable.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidConfig`] for zero trials or zero days.
    pub fn check(&self) -> PortfolioResult<()> {
        if self.n_simulations == 0 {
            return Err(PortfolioError::invalid_config(
                "n_simulations",
                "must be at least 1",
            ));
        }
        if self.trading_days == 0 {
            return Err(PortfolioError::invalid_config(
                "trading_days",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
