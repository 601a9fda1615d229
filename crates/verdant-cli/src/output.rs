//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
///
/// JSON callers usually print the underlying result with [`print_json`]
/// instead, so this renders JSON as an array of rows.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(&data),
        OutputFormat::Csv => print_csv(data),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    println!("{}", render_table(data));
    Ok(())
}

/// Renders rows with the rounded style, first column left-aligned.
pub fn render_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string()
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints rows as CSV with a header line.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a percentage figure, e.g. `12.00%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Formats a signed percentage figure, e.g. `+1.00%`.
pub fn format_signed_percent(value: f64) -> String {
    format!("{value:+.2}%")
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair formatted as a percentage.
    pub fn from_percent(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, format_percent(value))
    }

    /// Creates a key-value pair with fixed precision.
    pub fn from_f64(key: impl Into<String>, value: f64, precision: usize) -> Self {
        Self::new(key, format!("{value:.precision$}"))
    }
}

/// A metric row tagged with the section it belongs to, for CSV output.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct SectionRow {
    #[tabled(rename = "Section")]
    pub section: String,
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Prints titled sections: one table each in table mode, one flat
/// `section,metric,value` CSV otherwise.
pub fn print_sections(sections: &[(&str, Vec<KeyValue>)], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            for (title, rows) in sections {
                print_header(title);
                print_table(rows)?;
            }
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Csv => {
            let flat = flatten_sections(sections);
            print_output(&flat, format)
        }
    }
}

/// Flattens titled sections into section-tagged rows.
pub fn flatten_sections(sections: &[(&str, Vec<KeyValue>)]) -> Vec<SectionRow> {
    sections
        .iter()
        .flat_map(|(title, rows)| {
            rows.iter().map(move |kv| SectionRow {
                section: (*title).to_string(),
                metric: kv.key.clone(),
                value: kv.value.clone(),
            })
        })
        .collect()
}
