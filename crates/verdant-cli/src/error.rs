//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The file extension is not csv or json.
    #[error("Unsupported input format for {}: expected .csv or .json", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A row or value in an input file could not be used.
    #[error("Invalid input in {}: {message}", .path.display())]
    InvalidInput {
        /// The input file.
        path: PathBuf,
        /// What was wrong.
        message: String,
    },

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Creates an invalid input error.
    pub fn invalid_input(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
