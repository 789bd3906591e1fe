//! Error types for deadline computation and export.
//!
//! Malformed input data (bad dates, blank rows, missing client names) is never
//! an error here; those rows are skipped. Only configuration problems and
//! failures of the underlying writers surface as `DeadlineError`.

use thiserror::Error;

/// Errors that can occur while loading settings or assembling an export.
#[derive(Error, Debug)]
pub enum DeadlineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Document generation error: {0}")]
    DocumentGenerate(#[from] zip::result::ZipError),

    #[error("Document XML error: {0}")]
    DocumentXml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for DeadlineError {
    fn from(err: toml::de::Error) -> Self {
        DeadlineError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for DeadlineError {
    fn from(err: serde_json::Error) -> Self {
        DeadlineError::Serialization(err.to_string())
    }
}

/// Result type alias for deadline operations.
pub type DeadlineResult<T> = Result<T, DeadlineError>;
