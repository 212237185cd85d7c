// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Shopfront API
//!
//! Typed wrappers over the storefront's remote endpoints. Every call goes
//! through [`AuthClient`], so each one gets the bearer token and the
//! refresh-and-retry cycle.
//!
//! | Group | Type | Endpoints |
//! |-------|------|-----------|
//! | Accounts | [`AuthApi`] | `/user`, `/login`, `/logout`, `/update-password`, `/send-otp`, `/verify-otp` |
//! | Catalog | [`CatalogApi`] | `GET /product` |
//! | Cart | [`CartApi`] | `POST /cart` |
//! | Admin | [`AdminApi`] | `/product`, `/product-price`, `/product-image`, `/category`, `/admin`, `/delete-user` |
//!
//! ## Usage
//!
//! ```ignore
//! use shopfront_api::ShopApi;
//!
//! let shop = ShopApi::new(Arc::new(client));
//! let user = shop.auth().login("ada@example.com", "secret").await?;
//! let products = shop.catalog().list_products(Some("mug")).await?;
//!
//! // Admin calls are only reachable after a role check
//! let admin = shop.admin().await?;
//! admin.update_price("p1", 9.5).await?;
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod error;
mod response;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use shopfront_fetch::AuthClient;
use tracing::debug;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use cart::{CartApi, CheckoutReport};
pub use catalog::CatalogApi;
pub use error::ApiError;

/// Entry point to the typed endpoint groups.
#[derive(Debug, Clone)]
pub struct ShopApi {
    client: Arc<AuthClient>,
}

impl ShopApi {
    /// Wraps an authenticated client.
    pub fn new(client: Arc<AuthClient>) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &Arc<AuthClient> {
        &self.client
    }

    /// Account endpoints.
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.client)
    }

    /// Catalog endpoints.
    pub fn catalog(&self) -> CatalogApi<'_> {
        CatalogApi::new(&self.client)
    }

    /// Server-side cart endpoints.
    pub fn cart(&self) -> CartApi<'_> {
        CartApi::new(&self.client)
    }

    /// Admin endpoints, after confirming the signed-in user is an admin.
    pub async fn admin(&self) -> Result<AdminApi<'_>, ApiError> {
        let user = self.auth().current_user().await?;
        if !user.is_admin() {
            debug!(user = %user.email, "Admin access refused");
            return Err(ApiError::Forbidden);
        }
        Ok(AdminApi::new(&self.client))
    }
}
