//! Error types for the odds engine

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum BalutError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Degenerate configuration: {0}")]
    DegenerateConfiguration(String),

    #[error("Random source failure: {0}")]
    RandomSourceFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for BalutError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_yml::Error> for BalutError {
    fn from(err: serde_yml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias
pub type BalutResult<T> = Result<T, BalutError>;
