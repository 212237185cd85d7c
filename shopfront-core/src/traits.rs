//! Storage ports for Shopfront.
//!
//! The cart store and the authenticated client never touch the filesystem
//! directly; they go through these traits so they can run against an
//! in-memory backend in tests.

use crate::error::CoreError;
use crate::models::{CartLine, Credentials};

/// Persisted session credentials.
///
/// Implementations are shared process-wide state: last write wins, and
/// there is no coordination between processes.
pub trait CredentialStore: Send + Sync {
    /// Loads the stored credentials, if any.
    fn load(&self) -> Result<Option<Credentials>, CoreError>;

    /// Replaces the stored credentials.
    fn save(&self, credentials: &Credentials) -> Result<(), CoreError>;

    /// Removes all stored credentials.
    fn clear(&self) -> Result<(), CoreError>;

    /// Returns the stored access token.
    ///
    /// Read failures and empty tokens are treated as "no token".
    fn access_token(&self) -> Option<String> {
        self.load()
            .ok()
            .flatten()
            .map(|c| c.access_token)
            .filter(|t| !t.is_empty())
    }

    /// Returns the stored refresh token.
    fn refresh_token(&self) -> Option<String> {
        self.load()
            .ok()
            .flatten()
            .map(|c| c.refresh_token)
            .filter(|t| !t.is_empty())
    }

    /// Replaces the access token, keeping the refresh token.
    fn update_access_token(&self, access_token: &str) -> Result<(), CoreError> {
        let mut credentials = self.load()?.ok_or(CoreError::NoSession)?;
        credentials.access_token = access_token.to_string();
        self.save(&credentials)
    }
}

/// Persisted cart snapshot.
pub trait CartPersistence: Send {
    /// Loads the persisted lines; `None` when nothing was ever saved.
    fn load(&self) -> Result<Option<Vec<CartLine>>, CoreError>;

    /// Replaces the persisted lines with `lines`.
    fn save(&self, lines: &[CartLine]) -> Result<(), CoreError>;
}
