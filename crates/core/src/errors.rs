//! Core error types for the quarterly diff engine.
//!
//! Every failure raised while opening, parsing, aggregating or comparing
//! portfolios ends up in [`Error`]. Nothing here is retried: the caller gets
//! the first error and no partial result.

use std::path::PathBuf;

use thiserror::Error;

use crate::holdings::HoldingKey;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the quarterly diff engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Only .xls and .xlsx files are supported - a '{extension}' file was provided ({path})")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Worksheet '{sheet}' not found. Available sheets: {}", available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("Header not found for {field}: none of [{}] matched", labels.join(", "))]
    HeaderNotFound { field: String, labels: Vec<String> },

    #[error("Mismatched holding keys: {left} != {right}")]
    MismatchedKey { left: HoldingKey, right: HoldingKey },

    #[error("Value overflow while combining {field} of {key}")]
    ValueOverflow { key: HoldingKey, field: &'static str },

    #[error("Invalid number in row {row}, column {column}: '{value}'")]
    InvalidNumber {
        row: u32,
        column: usize,
        value: String,
    },

    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Failed to write report: {0}")]
    Report(#[from] ReportError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("A comparison is already running")]
    AlreadyRunning,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the report writers.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Error::Report(ReportError::Xlsx(err))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Report(ReportError::Csv(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
