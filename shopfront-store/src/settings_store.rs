//! User preferences store.
//!
//! Manages user settings with persistence.

use serde::{Deserialize, Serialize};
use shopfront_fetch::ClientSettings;
use shopfront_fetch::settings::{DEFAULT_API_BASE_URL, DEFAULT_API_VERSION};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json_or_default, save_json};

/// Environment variable that overrides the saved API host.
pub const API_URL_ENV: &str = "SHOPFRONT_API_URL";

// ============================================================================
// Settings Types
// ============================================================================

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// API host, without the version segment.
    pub api_base_url: String,

    /// API version path segment.
    pub api_version: String,

    /// Timeout for ordinary requests, in seconds.
    pub request_timeout_secs: u64,

    /// Timeout for the token refresh exchange, in seconds.
    pub refresh_timeout_secs: u64,

    /// Log level.
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            request_timeout_secs: 30,
            refresh_timeout_secs: 15,
            log_level: LogLevel::default(),
        }
    }
}

impl Settings {
    /// Applies `SHOPFRONT_API_URL` when it is set and non-empty.
    #[must_use]
    pub fn with_env_override(self) -> Self {
        let value = std::env::var(API_URL_ENV).ok();
        self.with_api_url_override(value.as_deref())
    }

    /// Replaces the API host when `url` is non-empty.
    #[must_use]
    pub fn with_api_url_override(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            debug!(url, "API host overridden");
            self.api_base_url = url.to_string();
        }
        self
    }

    /// Checks that the values are usable.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` describing the first bad value.
    pub fn validate(&self) -> Result<(), StoreError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(StoreError::Config(format!(
                "api_base_url must start with http:// or https://, got {url:?}"
            )));
        }
        if self.request_timeout_secs == 0 || self.refresh_timeout_secs == 0 {
            return Err(StoreError::Config("timeouts must be at least 1 second".into()));
        }
        Ok(())
    }

    /// Client settings for these preferences.
    pub fn to_client_settings(&self) -> ClientSettings {
        ClientSettings::new(self.api_base_url.trim())
            .with_api_version(self.api_version.clone())
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs.max(1)))
            .with_refresh_timeout(Duration::from_secs(self.refresh_timeout_secs.max(1)))
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Persistent settings store.
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store holding defaults.
    pub fn new(path: PathBuf) -> Self {
        Self {
            settings: Arc::new(RwLock::new(Settings::default())),
            path,
        }
    }

    /// Loads settings from the default path.
    pub async fn load_default() -> Self {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path.
    ///
    /// A missing or unreadable file gives defaults.
    pub async fn load(path: PathBuf) -> Self {
        debug!(path = %path.display(), "Loading settings");
        let settings = load_json_or_default(&path).await;
        Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
        }
    }

    /// The settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings in memory.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.settings.write().await;
        f(&mut settings);
    }

    /// Restores defaults in memory.
    pub async fn reset(&self) {
        self.update(|s| *s = Settings::default()).await;
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if the settings are invalid or cannot be written.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.get().await;
        settings.validate()?;
        save_json(&self.path, &settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "http://localhost:8080");
        assert_eq!(settings.api_version, "v1");
        assert_eq!(settings.log_level, LogLevel::Warn);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_client_settings() {
        let mut settings = Settings::default();
        settings.api_base_url = "https://shop.example.com/".into();
        settings.refresh_timeout_secs = 5;

        let client = settings.to_client_settings();
        assert_eq!(client.api_url(), "https://shop.example.com/v1");
        assert_eq!(client.refresh_timeout, Duration::from_secs(5));
        assert_eq!(client.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_url_override() {
        let settings = Settings::default().with_api_url_override(Some("https://api.test"));
        assert_eq!(settings.api_base_url, "https://api.test");

        let settings = Settings::default().with_api_url_override(Some("  "));
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);

        let settings = Settings::default().with_api_url_override(None);
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.api_base_url = "localhost:8080".into();
        assert!(matches!(settings.validate(), Err(StoreError::Config(_))));

        let mut settings = Settings::default();
        settings.refresh_timeout_secs = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"api_base_url": "https://shop.test"}"#).unwrap();
        assert_eq!(settings.api_base_url, "https://shop.test");
        assert_eq!(settings.api_version, "v1");
        assert_eq!(settings.refresh_timeout_secs, 15);
    }

    #[tokio::test]
    async fn test_settings_store_update_and_reset() {
        let store = SettingsStore::new(PathBuf::from("/tmp/shopfront_test_settings.json"));

        store.update(|s| s.log_level = LogLevel::Debug).await;
        assert_eq!(store.get().await.log_level, LogLevel::Debug);

        store.reset().await;
        assert_eq!(store.get().await, Settings::default());
    }

    #[tokio::test]
    async fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("settings.json")).await;
        assert_eq!(store.get().await, Settings::default());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = SettingsStore::load(path).await;
        assert_eq!(store.get().await, Settings::default());
    }

    #[tokio::test]
    async fn test_load_saved_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"api_base_url": "https://shop.test", "log_level": "debug"}"#)
            .unwrap();

        let store = SettingsStore::load(path).await;
        let settings = store.get().await;
        assert_eq!(settings.api_base_url, "https://shop.test");
        assert_eq!(settings.log_level, LogLevel::Debug);
    }
}
