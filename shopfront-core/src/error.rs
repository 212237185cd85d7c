//! Core error types for Shopfront.

use thiserror::Error;

/// Core error type for Shopfront operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid data from API response or persisted state.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// No signed-in session.
    #[error("Not signed in")]
    NoSession,

    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
