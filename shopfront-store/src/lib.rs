// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Shopfront Store
//!
//! Local state for the Shopfront client.
//!
//! This crate provides:
//!
//! - **CartStore**: The cart, with merge rules and derived totals, persisted
//!   after every mutation
//! - **FileCartPersistence** / **FileCredentialStore**: JSON files under the
//!   platform data directory
//! - **SettingsStore**: User preferences with persistence
//! - **Persistence**: File I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use shopfront_store::{CartStore, FileCartPersistence};
//!
//! let mut cart = CartStore::load(Box::new(FileCartPersistence::default_location()));
//! cart.add_item(&product, 2);
//! println!("{} items, {:.2} total", cart.total_items(), cart.total_price());
//! ```

pub mod cart_file;
pub mod cart_store;
pub mod credentials;
pub mod error;
pub mod persistence;
pub mod settings_store;

pub use cart_file::{CART_STORAGE_KEY, FileCartPersistence};
pub use cart_store::CartStore;
pub use credentials::FileCredentialStore;
pub use error::StoreError;
pub use persistence::{
    default_cart_path, default_config_dir, default_credentials_path, default_data_dir,
    default_settings_path, load_json, load_json_or_default, save_json,
};
pub use settings_store::{LogLevel, Settings, SettingsStore, API_URL_ENV};
#[cfg(test)]
mod persistence_tests;
