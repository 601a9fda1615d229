//! Forecast command implementation.
//!
//! Heuristic single-holding return forecast from an ESG score and sector.

use anyhow::Result;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use verdant_portfolio::{HeuristicForecaster, ReturnForecast, Sector};

use crate::cli::OutputFormat;
use crate::output::{format_signed_percent, print_json, print_sections, KeyValue};

/// Arguments for the forecast command.
#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// ESG score of the holding (0-100)
    #[arg(long)]
    pub esg: f64,

    /// Sector, e.g. Technology, Finance, "Renewable Energy"
    #[arg(long, default_value = "Consumer")]
    pub sector: String,

    /// Random seed for the forecast noise
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable the forecast noise
    #[arg(long, conflicts_with = "seed")]
    pub no_noise: bool,
}

/// Execute the forecast command.
pub fn execute(args: ForecastArgs, format: OutputFormat) -> Result<()> {
    // FromStr for Sector is infallible; unknown names become Sector::Other.
    let sector: Sector = args.sector.parse().unwrap_or_default();

    let forecaster = if args.no_noise {
        HeuristicForecaster::STANDARD.noiseless()
    } else {
        HeuristicForecaster::STANDARD
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let forecast = forecaster.forecast(args.esg, &sector, &mut rng)?;
    tracing::debug!(sector = %sector, esg = args.esg, "forecast computed");

    match format {
        OutputFormat::Json => print_json(&forecast),
        _ => print_sections(&[("Return Forecast", rows(&sector, &forecast))], format),
    }
}

fn rows(sector: &Sector, forecast: &ReturnForecast) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Sector", sector.name()),
        KeyValue::from_percent("Predicted Return", forecast.predicted_return),
        KeyValue::new("Benchmark Spread", format_signed_percent(forecast.benchmark_spread)),
        KeyValue::from_f64("Confidence", forecast.confidence_score, 1),
        KeyValue::new("Model", forecast.model_used.clone()),
    ]
}
