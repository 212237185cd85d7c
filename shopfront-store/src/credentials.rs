//! File-backed credential store.
//!
//! Both tokens live in one JSON file (`{"accessToken", "refreshToken"}`)
//! with owner-only permissions. Clearing removes the file.

use std::path::{Path, PathBuf};

use shopfront_core::{CoreError, CredentialStore, Credentials};
use tracing::debug;

use crate::persistence::{
    default_credentials_path, load_json_sync, remove_file_if_exists, save_json_sync,
};

/// Credential store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Stores credentials at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Stores credentials at `<data dir>/shopfront/credentials.json`.
    pub fn default_location() -> Self {
        Self::new(default_credentials_path())
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, CoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(load_json_sync(&self.path)?))
    }

    fn save(&self, credentials: &Credentials) -> Result<(), CoreError> {
        save_json_sync(&self.path, credentials)?;
        debug!(path = %self.path.display(), "Credentials saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        remove_file_if_exists(&self.path)?;
        debug!(path = %self.path.display(), "Credentials cleared");
        Ok(())
    }
}
