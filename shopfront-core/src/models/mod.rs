//! Domain models for Shopfront.
//!
//! These types mirror the JSON shapes spoken by the remote storefront API
//! (camelCase on the wire) and the shapes persisted locally.
//!
//! ## Submodules
//!
//! - [`catalog`] - Products and categories
//! - [`account`] - Users, login and registration payloads
//! - [`cart`] - Cart lines
//! - [`session`] - Credentials and session state

mod account;
mod cart;
mod catalog;
mod session;

// Re-export everything at the models level
pub use account::{LoginResponse, RefreshResponse, Registration, User};
pub use cart::CartLine;
pub use catalog::{Category, NewProduct, Product};
pub use session::{Credentials, SessionState};
#[cfg(test)]
mod serde_tests;
