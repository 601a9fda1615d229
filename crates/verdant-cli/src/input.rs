//! Holdings and ESG score file loading.
//!
//! Holdings: CSV with header `identifier,shares,cost_basis[,esg_score]`, or a
//! JSON array of objects with the same keys. Scores: CSV
//! `identifier,esg_score`, or a JSON object mapping identifier to score.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use verdant_portfolio::{Holding, ScoreBook};

use crate::error::{CliError, CliResult};

/// Supported input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// JSON.
    Json,
}

impl InputFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> CliResult<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(CliError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Holdings plus any scores supplied alongside them.
#[derive(Debug, Clone, Default)]
pub struct HoldingsFile {
    /// Holdings in file order.
    pub holdings: Vec<Holding>,
    /// The optional `esg_score` column, one entry per holding.
    pub row_scores: Vec<Option<f64>>,
}

impl HoldingsFile {
    fn push(&mut self, holding: Holding, score: Option<f64>) {
        self.holdings.push(holding);
        self.row_scores.push(score);
    }

    /// Number of rows that carried a score.
    pub fn scored(&self) -> usize {
        self.row_scores.iter().flatten().count()
    }

    /// One score per holding: the row's own score, else `book`, else its
    /// default.
    pub fn scores(&self, book: &ScoreBook) -> Vec<f64> {
        book.fill(&self.holdings, &self.row_scores)
    }
}

#[derive(Debug, Deserialize)]
struct CsvHoldingRecord {
    identifier: String,
    shares: String,
    #[serde(alias = "avg_cost")]
    cost_basis: String,
    #[serde(default)]
    esg_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct JsonHoldingRecord {
    identifier: String,
    shares: Decimal,
    #[serde(alias = "avg_cost")]
    cost_basis: Decimal,
    #[serde(default)]
    esg_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CsvScoreRecord {
    identifier: String,
    esg_score: f64,
}

/// Loads holdings from a `.csv` or `.json` file.
pub fn load_holdings(path: &Path) -> CliResult<HoldingsFile> {
    let format = InputFormat::from_path(path)?;
    let file = std::fs::File::open(path)?;
    let loaded = match format {
        InputFormat::Csv => parse_holdings_csv(file),
        InputFormat::Json => parse_holdings_json(file),
    }
    .map_err(|e| match e {
        CliError::InvalidArgument(message) => CliError::invalid_input(path, message),
        other => other,
    })?;

    tracing::debug!(
        path = %path.display(),
        holdings = loaded.holdings.len(),
        scored = loaded.scored(),
        "loaded holdings"
    );
    Ok(loaded)
}

/// Loads an ESG score file.
pub fn load_scores(path: &Path) -> CliResult<ScoreBook> {
    let format = InputFormat::from_path(path)?;
    let file = std::fs::File::open(path)?;
    let book = match format {
        InputFormat::Csv => parse_scores_csv(file)?,
        InputFormat::Json => parse_scores_json(file)?,
    };
    tracing::debug!(path = %path.display(), scores = book.len(), "loaded ESG scores");
    Ok(book)
}

/// Parses holdings CSV.
pub fn parse_holdings_csv<R: Read>(reader: R) -> CliResult<HoldingsFile> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut loaded = HoldingsFile::default();

    for (row, record) in rdr.deserialize::<CsvHoldingRecord>().enumerate() {
        let record = record?;
        let shares = parse_decimal(&record.shares, "shares", row)?;
        let cost_basis = parse_decimal(&record.cost_basis, "cost_basis", row)?;
        loaded.push(
            Holding::new(record.identifier, shares, cost_basis),
            record.esg_score,
        );
    }
    Ok(loaded)
}

/// Parses a holdings JSON array.
pub fn parse_holdings_json<R: Read>(reader: R) -> CliResult<HoldingsFile> {
    let records: Vec<JsonHoldingRecord> = serde_json::from_reader(reader)?;
    let mut loaded = HoldingsFile::default();
    for record in records {
        loaded.push(
            Holding::new(record.identifier, record.shares, record.cost_basis),
            record.esg_score,
        );
    }
    Ok(loaded)
}

/// Parses `identifier,esg_score` CSV.
pub fn parse_scores_csv<R: Read>(reader: R) -> CliResult<ScoreBook> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut book = ScoreBook::new();
    for record in rdr.deserialize::<CsvScoreRecord>() {
        let record = record?;
        book.insert(record.identifier, record.esg_score);
    }
    Ok(book)
}

/// Parses a JSON object of identifier to score.
pub fn parse_scores_json<R: Read>(reader: R) -> CliResult<ScoreBook> {
    let map: HashMap<String, f64> = serde_json::from_reader(reader)?;
    Ok(map.into_iter().collect())
}

fn parse_decimal(raw: &str, field: &str, row: usize) -> CliResult<Decimal> {
    Decimal::from_str(raw).map_err(|e| {
        // Header is line 1, so data row 0 is line 2.
        CliError::InvalidArgument(format!("line {}: {field} '{raw}': {e}", row + 2))
    })
}
