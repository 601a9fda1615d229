//! Analyze command implementation.
//!
//! Validates a portfolio once, then reports metrics, the benchmark
//! comparison and the Monte Carlo summary.

use anyhow::Result;
use clap::Args;
use verdant_portfolio::AnalysisResult;

use crate::cli::OutputFormat;
use crate::commands::{build_analyzer, RunArgs};
use crate::output::{format_signed_percent, print_info, print_json, print_sections, KeyValue};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, format: OutputFormat) -> Result<()> {
    let settings = args.run.load_settings()?;
    let portfolio = args.run.load_portfolio()?;

    if settings.simulation.seed.is_none() && format == OutputFormat::Table {
        print_info("No seed given; simulation results will vary between runs");
    }

    let result = build_analyzer(&settings).analyze(&portfolio.holdings, &portfolio.esg_scores)?;

    match format {
        OutputFormat::Json => print_json(&result),
        _ => print_sections(&sections(&result), format),
    }
}

fn sections(result: &AnalysisResult) -> [(&'static str, Vec<KeyValue>); 3] {
    let m = &result.metrics;
    let b = &result.benchmark_comparison;
    let mc = &result.monte_carlo;

    [
        (
            "Portfolio Metrics",
            vec![
                KeyValue::from_percent("Expected Return", m.expected_return),
                KeyValue::from_percent("Volatility", m.volatility),
                KeyValue::from_f64("Sharpe Ratio", m.sharpe_ratio, 3),
                KeyValue::from_percent("VaR (95%)", m.var_95),
                KeyValue::from_percent("ESG-Adjusted Return", m.esg_adjusted_return),
            ],
        ),
        (
            "Benchmark Comparison",
            vec![
                KeyValue::from_percent("Benchmark Return", b.benchmark_return),
                KeyValue::from_percent("Portfolio Return", b.portfolio_return),
                KeyValue::new("Excess Return", format_signed_percent(b.excess_return)),
                KeyValue::new("Alpha", format_signed_percent(b.alpha)),
                KeyValue::new("Outperformance", yes_no(b.outperformance)),
                KeyValue::new("ESG Lifts Alpha", yes_no(b.esg_lifts_alpha())),
            ],
        ),
        (
            "Monte Carlo",
            vec![
                KeyValue::from_percent("Mean Return", mc.mean_return),
                KeyValue::from_percent("Std Dev", mc.std_dev),
                KeyValue::from_percent("Min", mc.min_return),
                KeyValue::from_percent("Max", mc.max_return),
                KeyValue::from_percent("5th Percentile", mc.percentile_5),
                KeyValue::from_percent("95th Percentile", mc.percentile_95),
                KeyValue::from_percent("P(Return > 0)", mc.prob_positive),
                KeyValue::new("ESG Bonus", format_signed_percent(mc.esg_bonus_applied)),
                KeyValue::new(
                    "Drift vs Expected",
                    format_signed_percent(result.simulation_drift()),
                ),
            ],
        ),
    ]
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
