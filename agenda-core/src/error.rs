//! Error types for the agenda engine.

use thiserror::Error;

/// Errors that can occur in agenda operations.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Appointment not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AgendaError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        AgendaError::Validation(msg.into())
    }
}

impl From<serde_json::Error> for AgendaError {
    fn from(err: serde_json::Error) -> Self {
        AgendaError::Serialization(err.to_string())
    }
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
