//! Verdant Configuration Layer
//!
//! Layered, validated settings for the Verdant portfolio analytics core:
//! the baseline return model, Monte Carlo parameters and the benchmark.
//!
//! # Features
//!
//! - **File loading**: TOML or JSON, chosen by file extension
//! - **Defaults**: Every field falls back to the standard model constants
//! - **Environment overrides**: `VERDANT_SEED`, `VERDANT_SIMULATIONS`,
//!   `VERDANT_TRADING_DAYS`, `VERDANT_BENCHMARK_RETURN`
//! - **Validation**: All failures are collected, not just the first
//!
//! # Example
//!
//! ```rust
//! use verdant_config::{AnalysisSettings, Validate};
//!
//! let settings = AnalysisSettings::from_toml_str(
//!     r#"
//!     [simulation]
//!     seed = 42
//!     n_simulations = 2000
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(settings.is_valid());
//! let config = settings.to_simulation_config();
//! assert_eq!(config.seed, Some(42));
//! assert_eq!(settings.to_model().annual_volatility, 0.15);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod settings;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use settings::{
    AnalysisSettings, BaselineSettings, SimulationSettings, ENV_BENCHMARK_RETURN, ENV_SEED,
    ENV_SIMULATIONS, ENV_TRADING_DAYS, MAX_SIMULATIONS, MAX_TRADING_DAYS,
};
