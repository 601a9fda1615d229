//! CLI command implementations.

pub mod analyze;
pub mod config;
pub mod forecast;
pub mod simulate;

// Re-export submodules for convenience
pub use analyze::AnalyzeArgs;
pub use config::ConfigArgs;
pub use forecast::ForecastArgs;
pub use simulate::SimulateArgs;

use std::path::PathBuf;

use clap::Args;
use verdant_config::{AnalysisSettings, Validate};
use verdant_portfolio::{EsgBonusMode, Holding, PortfolioAnalyzer, ScoreBook};

use crate::error::{CliError, CliResult};
use crate::input::{load_holdings, load_scores};

/// Inputs and overrides shared by `analyze` and `simulate`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Holdings file (.csv or .json)
    #[arg(long)]
    pub holdings: PathBuf,

    /// ESG scores file (.csv or .json); fills scores missing from the holdings file
    #[arg(long)]
    pub scores: Option<PathBuf>,

    /// Settings file (.toml or .json)
    #[arg(long, env = "VERDANT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Random seed for a reproducible simulation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of Monte Carlo trials
    #[arg(long)]
    pub simulations: Option<usize>,

    /// Trading days per simulated year
    #[arg(long)]
    pub trading_days: Option<usize>,

    /// Benchmark annual return (as percentage, e.g., 11.0)
    #[arg(long)]
    pub benchmark: Option<f64>,

    /// Add the ESG simulation bonus to the simulated drift
    #[arg(long)]
    pub apply_esg_bonus: bool,
}

/// Holdings with one score per holding, in holding order.
#[derive(Debug, Clone)]
pub struct LoadedPortfolio {
    pub holdings: Vec<Holding>,
    pub esg_scores: Vec<f64>,
}

impl RunArgs {
    /// Resolves settings: defaults or file, then environment, then flags.
    pub fn load_settings(&self) -> anyhow::Result<AnalysisSettings> {
        let settings = match &self.config {
            Some(path) => AnalysisSettings::from_path(path)?,
            None => AnalysisSettings::default(),
        };
        let mut settings = settings.apply_env_overrides()?;

        if let Some(seed) = self.seed {
            settings.simulation.seed = Some(seed);
        }
        if let Some(n) = self.simulations {
            settings.simulation.n_simulations = n;
        }
        if let Some(days) = self.trading_days {
            settings.simulation.trading_days = days;
        }
        if let Some(benchmark) = self.benchmark {
            settings.benchmark_return = Some(benchmark);
        }
        if self.apply_esg_bonus {
            settings.simulation.esg_bonus_mode = EsgBonusMode::ApplyToDrift;
        }

        settings.validate_or_error()?;
        Ok(settings)
    }

    /// Reads holdings and lines scores up with them.
    pub fn load_portfolio(&self) -> CliResult<LoadedPortfolio> {
        let loaded = load_holdings(&self.holdings)?;
        if loaded.holdings.is_empty() {
            return Err(CliError::invalid_input(&self.holdings, "no holdings found"));
        }

        let book = match &self.scores {
            Some(path) => load_scores(path)?,
            None => ScoreBook::new(),
        };

        let esg_scores = loaded.scores(&book);
        Ok(LoadedPortfolio {
            holdings: loaded.holdings,
            esg_scores,
        })
    }
}

/// Builds the analyzer the settings describe.
pub fn build_analyzer(settings: &AnalysisSettings) -> PortfolioAnalyzer {
    let analyzer = PortfolioAnalyzer::new(settings.to_model())
        .with_simulation(settings.to_simulation_config());
    match settings.benchmark_return {
        Some(benchmark) => analyzer.with_benchmark_return(benchmark),
        None => analyzer,
    }
}
