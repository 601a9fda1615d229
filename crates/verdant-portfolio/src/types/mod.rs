//! Domain types for portfolio analytics.
//!
//! - [`Holding`]: A single position with shares and cost basis
//! - [`SimulationConfig`]: Configuration for Monte Carlo runs
//! - [`EsgBonusMode`]: How the simulator treats its ESG bonus

mod config;
mod holding;

pub use config::{EsgBonusMode, SimulationConfig, DEFAULT_SIMULATIONS, DEFAULT_TRADING_DAYS};
pub use holding::{total_book_value, Holding};
