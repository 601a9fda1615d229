//! Analysis settings.
//!
//! Settings load in layers: built-in defaults, then a TOML or JSON file, then
//! `VERDANT_*` environment overrides. Every field is optional in files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use verdant_portfolio::{
    BaselineReturnModel, EsgBonusMode, SimulationConfig, DEFAULT_SIMULATIONS, DEFAULT_TRADING_DAYS,
};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Overrides the simulation seed.
pub const ENV_SEED: &str = "VERDANT_SEED";
/// Overrides the number of simulated trials.
pub const ENV_SIMULATIONS: &str = "VERDANT_SIMULATIONS";
/// Overrides the trading days per simulated year.
pub const ENV_TRADING_DAYS: &str = "VERDANT_TRADING_DAYS";
/// Overrides the benchmark return (%).
pub const ENV_BENCHMARK_RETURN: &str = "VERDANT_BENCHMARK_RETURN";

/// Upper bound on simulated trials.
pub const MAX_SIMULATIONS: usize = 1_000_000;
/// Upper bound on trading days per simulated year.
pub const MAX_TRADING_DAYS: usize = 2520;

// =============================================================================
// DEFAULT VALUE FUNCTIONS
// =============================================================================

fn default_mean_return() -> f64 {
    BaselineReturnModel::STANDARD.annual_mean_return
}

fn default_volatility() -> f64 {
    BaselineReturnModel::STANDARD.annual_volatility
}

fn default_risk_free_rate() -> f64 {
    BaselineReturnModel::STANDARD.risk_free_rate
}

fn default_benchmark_return() -> f64 {
    BaselineReturnModel::STANDARD.benchmark_return_default
}

fn default_var_z_score() -> f64 {
    BaselineReturnModel::STANDARD.var_z_score
}

fn default_simulations() -> usize {
    DEFAULT_SIMULATIONS
}

fn default_trading_days() -> usize {
    DEFAULT_TRADING_DAYS
}

fn default_parallel() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    SimulationConfig::default().parallel_threshold
}

// =============================================================================
// BASELINE MODEL SETTINGS
// =============================================================================

/// Portfolio-level return distribution. Rates are decimal fractions, the
/// benchmark is in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineSettings {
    /// Expected annual return, e.g. 0.12.
    #[serde(default = "default_mean_return")]
    pub annual_mean_return: f64,

    /// Annual volatility, e.g. 0.15.
    #[serde(default = "default_volatility")]
    pub annual_volatility: f64,

    /// Risk-free rate, e.g. 0.05.
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,

    /// Benchmark annual return in percent, e.g. 11.0.
    #[serde(default = "default_benchmark_return")]
    pub benchmark_return_default: f64,

    /// One-tailed normal quantile used for VaR.
    #[serde(default = "default_var_z_score")]
    pub var_z_score: f64,
}

impl Default for BaselineSettings {
    fn default() -> Self {
        Self {
            annual_mean_return: default_mean_return(),
            annual_volatility: default_volatility(),
            risk_free_rate: default_risk_free_rate(),
            benchmark_return_default: default_benchmark_return(),
            var_z_score: default_var_z_score(),
        }
    }
}

impl Validate for BaselineSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let fields = [
            ("baseline.annual_mean_return", self.annual_mean_return),
            ("baseline.annual_volatility", self.annual_volatility),
            ("baseline.risk_free_rate", self.risk_free_rate),
            ("baseline.benchmark_return_default", self.benchmark_return_default),
            ("baseline.var_z_score", self.var_z_score),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                errors.push(ValidationError::with_rule(field, "must be a finite number", "finite"));
            }
        }

        if self.annual_mean_return <= -1.0 {
            errors.push(ValidationError::with_rule(
                "baseline.annual_mean_return",
                format!("{} would lose more than the whole portfolio", self.annual_mean_return),
                "min_return",
            ));
        }

        if self.annual_volatility < 0.0 || self.annual_volatility > 5.0 {
            errors.push(ValidationError::with_rule(
                "baseline.annual_volatility",
                "Volatility must be between 0 and 5 (500%)",
                "valid_volatility",
            ));
        }

        if self.var_z_score <= 0.0 {
            errors.push(ValidationError::with_rule(
                "baseline.var_z_score",
                "Z-score must be positive",
                "positive_z",
            ));
        }

        errors
    }
}

// =============================================================================
// SIMULATION SETTINGS
// =============================================================================

/// Monte Carlo settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Number of trials.
    #[serde(default = "default_simulations")]
    pub n_simulations: usize,

    /// Trading days per simulated year.
    #[serde(default = "default_trading_days")]
    pub trading_days: usize,

    /// Random seed for reproducibility (None = random).
    #[serde(default)]
    pub seed: Option<u64>,

    /// Whether the ESG bonus moves the simulated drift.
    #[serde(default)]
    pub esg_bonus_mode: EsgBonusMode,

    /// Allow parallel trials when built with the `parallel` feature.
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Minimum trial count before going parallel.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            n_simulations: default_simulations(),
            trading_days: default_trading_days(),
            seed: None,
            esg_bonus_mode: EsgBonusMode::default(),
            parallel: default_parallel(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl Validate for SimulationSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.n_simulations == 0 || self.n_simulations > MAX_SIMULATIONS {
            errors.push(ValidationError::with_rule(
                "simulation.n_simulations",
                format!("Simulations must be between 1 and {MAX_SIMULATIONS}"),
                "valid_simulations",
            ));
        }

        if self.trading_days == 0 || self.trading_days > MAX_TRADING_DAYS {
            errors.push(ValidationError::with_rule(
                "simulation.trading_days",
                format!("Trading days must be between 1 and {MAX_TRADING_DAYS}"),
                "valid_trading_days",
            ));
        }

        errors
    }
}

// =============================================================================
// ANALYSIS SETTINGS
// =============================================================================

/// Everything needed to run an analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Return model parameters.
    #[serde(default)]
    pub baseline: BaselineSettings,

    /// Monte Carlo parameters.
    #[serde(default)]
    pub simulation: SimulationSettings,

    /// Benchmark return (%) overriding the model default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark_return: Option<f64>,
}

impl AnalysisSettings {
    /// Parses settings from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Deserialization`] for malformed input.
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Parses settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Deserialization`] for malformed input.
    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Loads settings from a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, has an unknown
    /// extension or fails to parse. Values are not validated here.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = match extension.as_str() {
            "toml" => Self::from_toml_str(&contents)?,
            "json" => Self::from_json_str(&contents)?,
            _ => return Err(ConfigError::UnsupportedFormat { extension }),
        };

        tracing::debug!(path = %path.display(), "loaded analysis settings");
        Ok(settings)
    }

    /// Serializes to pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialization`] if a value has no TOML form.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serializes to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialization`] on failure.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Applies `VERDANT_*` overrides from the process environment.
    ///
    /// # Errors
    ///
    /// See [`apply_env_overrides_with`](Self::apply_env_overrides_with).
    pub fn apply_env_overrides(self) -> ConfigResult<Self> {
        self.apply_env_overrides_with(|name| std::env::var(name).ok())
    }

    /// Applies `VERDANT_*` overrides read through `lookup`.
    ///
    /// Unset or blank variables are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvOverride`] if a value does not parse.
    pub fn apply_env_overrides_with<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = parse_env(&lookup, ENV_SEED)? {
            self.simulation.seed = Some(seed);
        }
        if let Some(n) = parse_env(&lookup, ENV_SIMULATIONS)? {
            self.simulation.n_simulations = n;
        }
        if let Some(days) = parse_env(&lookup, ENV_TRADING_DAYS)? {
            self.simulation.trading_days = days;
        }
        if let Some(benchmark) = parse_env(&lookup, ENV_BENCHMARK_RETURN)? {
            self.benchmark_return = Some(benchmark);
        }
        Ok(self)
    }

    /// The benchmark return (%) in effect.
    #[must_use]
    pub fn effective_benchmark_return(&self) -> f64 {
        self.benchmark_return
            .unwrap_or(self.baseline.benchmark_return_default)
    }

    /// Builds the return model.
    #[must_use]
    pub fn to_model(&self) -> BaselineReturnModel {
        BaselineReturnModel {
            annual_mean_return: self.baseline.annual_mean_return,
            annual_volatility: self.baseline.annual_volatility,
            risk_free_rate: self.baseline.risk_free_rate,
            benchmark_return_default: self.baseline.benchmark_return_default,
            var_z_score: self.baseline.var_z_score,
        }
    }

    /// Builds the simulation configuration.
    #[must_use]
    pub fn to_simulation_config(&self) -> SimulationConfig {
        let s = &self.simulation;
        let config = SimulationConfig::new()
            .with_simulations(s.n_simulations)
            .with_trading_days(s.trading_days)
            .with_esg_bonus_mode(s.esg_bonus_mode)
            .with_parallel(s.parallel)
            .with_threshold(s.parallel_threshold);
        match s.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

impl Validate for AnalysisSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.baseline.validate();
        errors.extend(self.simulation.validate());

        if let Some(benchmark) = self.benchmark_return {
            if !benchmark.is_finite() {
                errors.push(ValidationError::with_rule(
                    "benchmark_return",
                    "must be a finite number",
                    "finite",
                ));
            }
        }

        errors
    }
}

fn parse_env<T, F>(lookup: &F, var: &str) -> ConfigResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::InvalidEnvOverride {
            var: var.to_string(),
            value: raw.clone(),
            message: e.to_string(),
        })
}
