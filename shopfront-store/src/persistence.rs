//! File persistence helpers.
//!
//! JSON files are written atomically (temp file + rename) and, on Unix,
//! readable by the owner only. Credentials live next to the cart, so every
//! file gets the same treatment.
//!
//! The async helpers serve settings; the blocking `*_sync` variants back the
//! storage ports, which are synchronous.

use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::StoreError;

const APP_DIR: &str = "shopfront";

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the default configuration directory.
///
/// - macOS: `~/Library/Application Support/shopfront`
/// - Linux: `~/.config/shopfront`
/// - Windows: `%APPDATA%\shopfront`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|c| c.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default data directory (cart and credentials).
///
/// - macOS: `~/Library/Application Support/shopfront`
/// - Linux: `~/.local/share/shopfront`
/// - Windows: `%APPDATA%\shopfront`
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default settings file path.
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.json")
}

/// Returns the default cart file path.
pub fn default_cart_path() -> PathBuf {
    default_data_dir().join("cart-storage.json")
}

/// Returns the default credentials file path.
pub fn default_credentials_path() -> PathBuf {
    default_data_dir().join("credentials.json")
}

// ============================================================================
// Security: File Permissions
// ============================================================================

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(mode);
    std::fs::set_permissions(path, perms)?;
    debug!(path = %path.display(), mode = %format!("{mode:o}"), "Set restrictive permissions");
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), StoreError> {
    Ok(())
}

/// Sets owner-only file permissions (0o600) on Unix systems.
fn set_restrictive_permissions(path: &Path) -> Result<(), StoreError> {
    set_mode(path, 0o600)
}

/// Sets owner-only directory permissions (0o700) on Unix systems.
fn set_restrictive_dir_permissions(path: &Path) -> Result<(), StoreError> {
    set_mode(path, 0o700)
}

// ============================================================================
// Blocking File Operations
// ============================================================================

/// Ensures a directory exists with secure permissions.
///
/// # Errors
///
/// Returns error if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    if !path.exists() {
        debug!(path = %path.display(), "Creating directory");
        std::fs::create_dir_all(path)?;
        set_restrictive_dir_permissions(path)?;
    }
    Ok(())
}

/// Writes `data` as pretty JSON to `path`, atomically.
///
/// # Errors
///
/// Returns error if serialization or any filesystem step fails.
pub fn save_json_sync<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<(), StoreError> {
    debug!(path = %path.display(), "Saving JSON file");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    let json = serde_json::to_string_pretty(data)?;

    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, json)?;
    set_restrictive_permissions(&temp_path)?;
    std::fs::rename(&temp_path, path)?;

    debug!(path = %path.display(), "JSON file saved securely");
    Ok(())
}

/// Reads and decodes a JSON file.
///
/// # Errors
///
/// Returns error if the file cannot be read or decoded.
pub fn load_json_sync<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Removes a file; a missing file is not an error.
///
/// # Errors
///
/// Returns error for any failure other than "not found".
pub fn remove_file_if_exists(path: &Path) -> Result<(), StoreError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Removed file");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

// ============================================================================
// Async File Operations
// ============================================================================

/// Saves data to a JSON file with secure permissions.
///
/// Runs the blocking write on tokio's blocking pool.
///
/// # Errors
///
/// Returns error if serialization or any filesystem step fails.
pub async fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    let json = serde_json::to_value(data)?;
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || save_json_sync(&path, &json))
        .await
        .map_err(|e| StoreError::Io(std::io::Error::other(e)))?
}

/// Loads data from a JSON file.
///
/// # Errors
///
/// Returns error if the file cannot be read or decoded.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    debug!(path = %path.display(), "Loading JSON file");

    let content = tokio::fs::read_to_string(path).await?;
    let data = serde_json::from_str(&content)?;

    debug!(path = %path.display(), "JSON file loaded");
    Ok(data)
}

/// Loads data from a JSON file, returning default if not found.
///
/// A file that exists but cannot be decoded is logged and replaced by the
/// default.
pub async fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path).await {
        Ok(data) => data,
        Err(e) => {
            if !e.is_not_found() {
                warn!(path = %path.display(), error = %e, "Failed to load, using defaults");
            }
            T::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
