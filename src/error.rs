//! Error types for bench-overview

use crate::config::ConfigError;
use thiserror::Error;

/// Report error type
#[derive(Error, Debug)]
pub enum ReportError {
    /// No file matched any of the search patterns
    #[error("no benchmark results found in: {patterns:?}")]
    NoResultsFound {
        /// Patterns that were searched, in preference order
        patterns: Vec<String>,
    },

    /// The result file had a header but no data rows
    #[error("result file is empty: {path}")]
    EmptyResultSet {
        /// Path of the empty file
        path: String,
    },

    /// An expected column is absent from the header
    #[error("'{0}' column not found in results")]
    MissingColumn(String),

    /// A single cell could not be converted to a number
    #[error("unparsable value in column '{column}': {value:?}")]
    UnparsableValue {
        /// Column the cell belongs to
        column: String,
        /// Raw cell text
        value: String,
    },

    /// More than one row maps to the same pivot cell
    #[error("duplicate entry for FileName '{file_name}' and Method '{method}'")]
    DuplicateKey {
        /// Sample the duplicate belongs to
        file_name: String,
        /// Method the duplicate belongs to
        method: String,
    },

    /// Invalid search pattern
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ReportError>;
