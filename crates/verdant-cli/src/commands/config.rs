//! Config command implementation.
//!
//! Shows the effective analysis settings or validates a settings file.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use verdant_config::{AnalysisSettings, ConfigError, Validate};

use crate::cli::OutputFormat;
use crate::output::{print_error, print_sections, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective settings (defaults, file, then environment)
    Show(FileArgs),

    /// Validate a settings file
    Validate(FileArgs),
}

/// Settings file selection.
#[derive(Args, Debug)]
pub struct FileArgs {
    /// Settings file (.toml or .json)
    #[arg(long, env = "VERDANT_CONFIG")]
    pub config: Option<PathBuf>,
}

impl FileArgs {
    fn load(&self) -> Result<AnalysisSettings, ConfigError> {
        let settings = match &self.config {
            Some(path) => AnalysisSettings::from_path(path)?,
            None => AnalysisSettings::default(),
        };
        settings.apply_env_overrides()
    }
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show(file) => show(&file, format),
        ConfigCommand::Validate(file) => validate(&file),
    }
}

fn show(file: &FileArgs, format: OutputFormat) -> Result<()> {
    let settings = file.load()?;
    match format {
        OutputFormat::Json => println!("{}", settings.to_json_string()?),
        OutputFormat::Csv => print_sections(&sections(&settings), format)?,
        OutputFormat::Table => {
            if file.config.is_none() {
                print_warning("No settings file given; showing built-in defaults");
            }
            print_sections(&sections(&settings), format)?;
        }
    }
    Ok(())
}

fn validate(file: &FileArgs) -> Result<()> {
    let settings = match file.load() {
        Ok(settings) => settings,
        Err(e) => {
            print_error(&e.to_string());
            return Err(e.into());
        }
    };

    let errors = settings.validate();
    if errors.is_empty() {
        let source = file
            .config
            .as_ref()
            .map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string());
        print_success(&format!("Settings are valid ({source})"));
        return Ok(());
    }

    for error in &errors {
        print_error(&error.to_string());
    }
    anyhow::bail!("{} validation error(s)", errors.len())
}

fn sections(settings: &AnalysisSettings) -> Vec<(&'static str, Vec<KeyValue>)> {
    let b = &settings.baseline;
    let s = &settings.simulation;
    vec![
        (
            "Baseline Model",
            vec![
                KeyValue::from_f64("annual_mean_return", b.annual_mean_return, 4),
                KeyValue::from_f64("annual_volatility", b.annual_volatility, 4),
                KeyValue::from_f64("risk_free_rate", b.risk_free_rate, 4),
                KeyValue::from_f64("benchmark_return_default", b.benchmark_return_default, 2),
                KeyValue::from_f64("var_z_score", b.var_z_score, 3),
            ],
        ),
        (
            "Simulation",
            vec![
                KeyValue::new("n_simulations", s.n_simulations.to_string()),
                KeyValue::new("trading_days", s.trading_days.to_string()),
                KeyValue::new(
                    "seed",
                    s.seed.map_or_else(|| "random".to_string(), |seed| seed.to_string()),
                ),
                KeyValue::new("esg_bonus_mode", format!("{:?}", s.esg_bonus_mode)),
                KeyValue::new("parallel", s.parallel.to_string()),
                KeyValue::new("parallel_threshold", s.parallel_threshold.to_string()),
            ],
        ),
        (
            "Benchmark",
            vec![KeyValue::from_f64(
                "benchmark_return",
                settings.effective_benchmark_return(),
                2,
            )],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sections() {
        let sections = sections(&AnalysisSettings::default());
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].1[1], KeyValue::new("annual_volatility", "0.1500"));
        assert_eq!(sections[1].1[2].value, "random");
        assert_eq!(sections[2].1[0].value, "11.00");
    }

    #[test]
    fn test_validate_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[simulation]\nn_simulations = 0\n").unwrap();

        let file = FileArgs { config: Some(path) };
        assert!(validate(&file).is_err());
    }
}
