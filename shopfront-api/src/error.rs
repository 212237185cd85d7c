//! API error types.

use shopfront_fetch::{FetchError, StatusCode};
use thiserror::Error;

/// Errors returned by the typed endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Status {
        /// Status returned by the API.
        status: StatusCode,
        /// Server-provided message, or the status reason.
        message: String,
    },

    /// Transport, refresh or credential failure.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The signed-in user is not an admin.
    #[error("Admin privileges required")]
    Forbidden,

    /// Input rejected before sending.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// Returns true if the session expired and the user must sign in again.
    pub fn is_login_required(&self) -> bool {
        matches!(self, ApiError::Fetch(e) if e.is_login_required())
    }

    /// Returns the HTTP status, for status errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<shopfront_core::CoreError> for ApiError {
    fn from(err: shopfront_core::CoreError) -> Self {
        match err {
            shopfront_core::CoreError::InvalidData(msg) => ApiError::InvalidInput(msg),
            other => ApiError::Fetch(FetchError::Credentials(other)),
        }
    }
}
