//! Persistence round-trip and edge case tests.
//!
//! Exercises the JSON helpers, the file-backed ports and the stores built on
//! top of them against real temporary directories.

use std::path::PathBuf;
use tempfile::TempDir;

use shopfront_core::{CartPersistence, CredentialStore, Credentials, Product};

use crate::cart_file::FileCartPersistence;
use crate::cart_store::CartStore;
use crate::credentials::FileCredentialStore;
use crate::persistence::{ensure_dir, load_json, load_json_or_default, save_json};
use crate::settings_store::{LogLevel, Settings, SettingsStore};

// ============================================================================
// JSON Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_and_load_settings_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("settings.json");

    let mut settings = Settings::default();
    settings.api_base_url = "https://shop.example.com".into();
    settings.log_level = LogLevel::Debug;

    save_json(&file_path, &settings).await.unwrap();
    let loaded: Settings = load_json(&file_path).await.unwrap();

    assert_eq!(loaded, settings);
}

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested_path = temp_dir.path().join("deeply").join("nested").join("test.json");

    save_json(&nested_path, &serde_json::json!({"key": "value"}))
        .await
        .unwrap();
    assert!(nested_path.exists());
}

#[tokio::test]
async fn test_load_nonexistent_file() {
    let file_path = PathBuf::from("/nonexistent/path/settings.json");

    let result: Result<Settings, _> = load_json(&file_path).await;
    assert!(result.unwrap_err().is_not_found());

    let fallback: Settings = load_json_or_default(&file_path).await;
    assert_eq!(fallback, Settings::default());
}

#[tokio::test]
async fn test_corrupt_settings_fall_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("settings.json");
    std::fs::write(&file_path, "{not json").unwrap();

    let store = SettingsStore::load(file_path).await;
    assert_eq!(store.get().await, Settings::default());
}

#[tokio::test]
async fn test_settings_store_save_then_reload() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("config").join("settings.json");

    let store = SettingsStore::load(file_path.clone()).await;
    store
        .update(|s| s.api_base_url = "https://api.shop.test".into())
        .await;
    store.save().await.unwrap();

    let reloaded = SettingsStore::load(file_path).await;
    assert_eq!(reloaded.get().await.api_base_url, "https://api.shop.test");
}

#[tokio::test]
async fn test_settings_store_refuses_invalid_save() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("settings.json");

    let store = SettingsStore::new(file_path.clone());
    store.update(|s| s.api_base_url = "ftp://nope".into()).await;

    assert!(store.save().await.is_err());
    assert!(!file_path.exists());
}

#[test]
fn test_ensure_dir_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let dir_path = temp_dir.path().join("data");

    ensure_dir(&dir_path).unwrap();
    ensure_dir(&dir_path).unwrap();

    assert!(dir_path.is_dir());
}

// ============================================================================
// Cart File Tests
// ============================================================================

#[test]
fn test_cart_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cart-storage.json");

    {
        let mut cart = CartStore::load(Box::new(FileCartPersistence::new(&path)));
        cart.add_item(&Product::new("p1", "Mug", 10.0), 2);
        cart.add_item(&Product::new("p2", "Plate", 4.5), 1);
        cart.update_quantity("p1", 3);
    }

    let cart = CartStore::load(Box::new(FileCartPersistence::new(&path)));
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.total_items(), 4);
    assert!((cart.total_price() - 34.5).abs() < 1e-9);
    assert_eq!(cart.lines()[0].product_id, "p1");
}

#[test]
fn test_cleared_cart_persists_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cart-storage.json");

    let mut cart = CartStore::load(Box::new(FileCartPersistence::new(&path)));
    cart.add_item(&Product::new("p1", "Mug", 10.0), 1);
    cart.clear_cart();

    let saved = FileCartPersistence::new(&path).load().unwrap();
    assert_eq!(saved, Some(vec![]));
}

#[test]
fn test_corrupt_cart_file_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cart-storage.json");
    std::fs::write(&path, "[[[").unwrap();

    let mut cart = CartStore::load(Box::new(FileCartPersistence::new(&path)));
    assert!(cart.is_empty());

    // The next mutation overwrites the unreadable file.
    cart.add_item(&Product::new("p1", "Mug", 1.0), 1);
    let reloaded = CartStore::load(Box::new(FileCartPersistence::new(&path)));
    assert_eq!(reloaded.total_items(), 1);
}

#[test]
fn test_cart_without_saved_at_loads() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cart-storage.json");
    std::fs::write(
        &path,
        r#"{"version": 1, "items": [{"productId": "p1", "quantity": 2}]}"#,
    )
    .unwrap();

    let cart = CartStore::load(Box::new(FileCartPersistence::new(&path)));
    assert_eq!(cart.total_items(), 2);
    assert!(cart.total_price().abs() < f64::EPSILON);
}

// ============================================================================
// Credential File Tests
// ============================================================================

#[test]
fn test_credentials_shared_between_handles() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("credentials.json");

    let writer = FileCredentialStore::new(&path);
    let reader = FileCredentialStore::new(&path);

    writer.save(&Credentials::new("a1", "r1")).unwrap();
    assert_eq!(reader.access_token().as_deref(), Some("a1"));

    writer.clear().unwrap();
    assert!(reader.access_token().is_none());
}

#[cfg(unix)]
#[test]
fn test_credentials_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let store = FileCredentialStore::new(temp_dir.path().join("credentials.json"));
    store.save(&Credentials::new("a", "r")).unwrap();

    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}
