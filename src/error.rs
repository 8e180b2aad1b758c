//! Error types for the forecast pipeline

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that terminate a forecast run
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("missing required column `{column}` in {table}")]
    MissingColumn { column: &'static str, table: String },

    #[error("unparseable date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("event store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid event row from store: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("model fitting failed: {0}")]
    Fit(String),
}
