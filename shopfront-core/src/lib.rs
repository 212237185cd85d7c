// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Shopfront Core
//!
//! Core types, models, and traits for the Shopfront storefront client.
//!
//! This crate provides the foundational abstractions used across all other
//! Shopfront crates, including:
//!
//! - Domain models (products, categories, users, cart lines)
//! - Session credentials and session state
//! - Error types
//! - Storage ports for credentials and the cart
//!
//! ## Key Types
//!
//! ### Catalog
//! - [`Product`] - A product as returned by the remote API
//! - [`Category`] - Product category
//! - [`NewProduct`] - Payload for creating a product
//!
//! ### Accounts
//! - [`User`] - The signed-in user
//! - [`LoginResponse`] - Tokens and user returned by a login
//! - [`Registration`] - Sign-up payload
//!
//! ### Cart
//! - [`CartLine`] - One product/quantity entry in the cart
//!
//! ### Session
//! - [`Credentials`] - Access and refresh token pair
//! - [`SessionState`] - Whether a user is signed in
//!
//! ### Ports
//! - [`CredentialStore`] - Persisted session credentials
//! - [`CartPersistence`] - Persisted cart snapshot

pub mod error;
pub mod memory;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Catalog
    Category,
    NewProduct,
    Product,
    // Accounts
    LoginResponse,
    RefreshResponse,
    Registration,
    User,
    // Cart
    CartLine,
    // Session
    Credentials,
    SessionState,
};

// Re-export ports and in-memory adapters
pub use memory::{MemoryCartPersistence, MemoryCredentialStore};
pub use traits::{CartPersistence, CredentialStore};
