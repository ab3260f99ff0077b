//! Единый тип ошибок публичного API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Quote profile error in header field {field}: {reason}")]
    QuoteProfile { field: usize, reason: &'static str },

    #[error("Statement has no transactions")]
    EmptyStatement,
}

pub type Result<T> = std::result::Result<T, ConvertError>;
