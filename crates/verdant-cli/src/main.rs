//! Verdant CLI - ESG-aware portfolio risk analytics from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Full analysis: metrics, benchmark comparison, Monte Carlo summary
//! verdant analyze --holdings holdings.csv --scores esg.json --seed 42
//!
//! # Monte Carlo only, with the median path
//! verdant simulate --holdings holdings.json --simulations 5000 --path
//!
//! # Single-holding return forecast
//! verdant forecast --esg 82 --sector "Renewable Energy" --seed 7
//!
//! # Inspect or check settings
//! verdant config show --config verdant.toml
//! verdant config validate --config verdant.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod input;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    // Set up output format
    let format = cli.format;

    // Execute command
    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, format)?,
        Commands::Simulate(args) => commands::simulate::execute(args, format)?,
        Commands::Forecast(args) => commands::forecast::execute(args, format)?,
        Commands::Config(args) => commands::config::execute(args, format)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays parseable in json/csv mode.
fn init_logging(verbose: bool, quiet: bool) {
    let default_directives = if verbose {
        "verdant_cli=debug,verdant_portfolio=debug,verdant_config=debug"
    } else if quiet {
        "verdant_cli=error,verdant_portfolio=error,verdant_config=error"
    } else {
        "verdant_cli=info,verdant_portfolio=info,verdant_config=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
