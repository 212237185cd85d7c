//! Fetch error types.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid response from the API.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Credential storage failed.
    #[error("Credential storage error: {0}")]
    Credentials(#[from] shopfront_core::CoreError),

    /// A 401 could not be recovered; the session was cleared.
    #[error("Session refresh failed: {0}")]
    Refresh(#[from] RefreshError),
}

impl FetchError {
    /// Returns true if the user has to sign in again.
    pub fn is_login_required(&self) -> bool {
        matches!(self, FetchError::Refresh(_))
    }
}

// ============================================================================
// Refresh Error
// ============================================================================

/// Why a token refresh failed.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// No refresh token was stored.
    #[error("no refresh token stored")]
    MissingRefreshToken,

    /// The API answered the exchange with a non-success status.
    #[error("refresh rejected with status {status}")]
    Rejected {
        /// Status returned by `/refreshToken`.
        status: StatusCode,
    },

    /// The exchange did not complete in time.
    #[error("refresh timed out after {0:?}")]
    Timeout(Duration),

    /// The exchange failed at the transport level.
    #[error("refresh request failed: {0}")]
    Transport(String),

    /// The exchange succeeded but the body was unusable.
    #[error("invalid refresh response: {0}")]
    InvalidResponse(String),

    /// The new token could not be persisted.
    #[error("could not store refreshed token: {0}")]
    Storage(String),
}
