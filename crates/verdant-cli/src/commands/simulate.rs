//! Simulate command implementation.
//!
//! Runs only the Monte Carlo simulation, optionally printing the median path.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use verdant_portfolio::MonteCarloResult;

use crate::cli::OutputFormat;
use crate::commands::{build_analyzer, RunArgs};
use crate::output::{print_header, print_json, print_output, print_sections, KeyValue};

/// Arguments for the simulate command.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Print the median cumulative return path, one row per trading day
    #[arg(long)]
    pub path: bool,

    /// With --path, print every Nth day
    #[arg(long, default_value = "21")]
    pub step: usize,
}

/// Row for the median path table.
#[derive(Debug, Serialize, Tabled)]
struct PathRow {
    #[tabled(rename = "Day")]
    day: usize,
    #[tabled(rename = "Median Cumulative Return")]
    #[serde(rename = "median_cumulative_return")]
    median: String,
}

/// Execute the simulate command.
pub fn execute(args: SimulateArgs, format: OutputFormat) -> Result<()> {
    if args.step == 0 {
        anyhow::bail!("--step must be at least 1");
    }

    let settings = args.run.load_settings()?;
    let portfolio = args.run.load_portfolio()?;

    let result = build_analyzer(&settings).simulate(&portfolio.holdings, &portfolio.esg_scores)?;

    tracing::debug!(
        trials = settings.simulation.n_simulations,
        mean = result.mean_return,
        "simulation finished"
    );

    if format == OutputFormat::Json {
        return print_json(&result);
    }

    if args.path {
        let rows = path_rows(&result, args.step);
        if format == OutputFormat::Table {
            print_header("Median Path");
        }
        return print_output(&rows, format);
    }

    print_sections(&[("Monte Carlo", summary(&result))], format)
}

fn summary(result: &MonteCarloResult) -> Vec<KeyValue> {
    vec![
        KeyValue::from_percent("Mean Return", result.mean_return),
        KeyValue::from_percent("Std Dev", result.std_dev),
        KeyValue::from_percent("Min", result.min_return),
        KeyValue::from_percent("Max", result.max_return),
        KeyValue::from_percent("5th Percentile", result.percentile_5),
        KeyValue::from_percent("95th Percentile", result.percentile_95),
        KeyValue::from_percent("P(Return > 0)", result.prob_positive),
        KeyValue::from_f64("ESG Bonus (pp)", result.esg_bonus_applied, 2),
    ]
}

/// Every `step`th day, always ending on the final day.
fn path_rows(result: &MonteCarloResult, step: usize) -> Vec<PathRow> {
    let data = &result.simulation_data;
    let last = data.len().saturating_sub(1);

    data.iter()
        .enumerate()
        .filter(|(i, _)| (i + 1) % step == 0 || *i == last)
        .map(|(i, value)| PathRow {
            day: i + 1,
            median: format!("{value:.4}%"),
        })
        .collect()
}
