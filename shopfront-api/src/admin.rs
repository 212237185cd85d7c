//! Admin endpoints for products, categories and users.
//!
//! [`AdminApi`] is only handed out by [`ShopApi::admin`](crate::ShopApi::admin),
//! after the signed-in user's role has been checked. The server enforces the
//! same rule; the local check just fails faster.

use serde::Serialize;
use shopfront_core::{NewProduct, Registration};
use shopfront_fetch::{ApiRequest, AuthClient};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::response::send_unit;

// ============================================================================
// Endpoints
// ============================================================================

const PRODUCT_ENDPOINT: &str = "/product";
const PRODUCT_PRICE_ENDPOINT: &str = "/product-price";
const PRODUCT_IMAGE_ENDPOINT: &str = "/product-image";
const CATEGORY_ENDPOINT: &str = "/category";
const ADMIN_ENDPOINT: &str = "/admin";
const DELETE_USER_ENDPOINT: &str = "/delete-user";

// ============================================================================
// Request Bodies
// ============================================================================

#[derive(Serialize)]
struct PriceUpdate<'a> {
    id: &'a str,
    price: f64,
}

#[derive(Serialize)]
struct ImageUpdate<'a> {
    id: &'a str,
    image: &'a str,
}

#[derive(Serialize)]
struct ById<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct CategoryBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserRef<'a> {
    user_id: &'a str,
}

fn require(value: &str, what: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{what} is required")));
    }
    Ok(())
}

// ============================================================================
// Admin API
// ============================================================================

/// Admin endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AdminApi<'a> {
    client: &'a AuthClient,
}

impl<'a> AdminApi<'a> {
    pub(crate) fn new(client: &'a AuthClient) -> Self {
        Self { client }
    }

    /// Creates a product.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<(), ApiError> {
        product.validate()?;
        let request = ApiRequest::post(PRODUCT_ENDPOINT).with_json(product)?;
        send_unit(self.client, request).await?;
        info!("Product created");
        Ok(())
    }

    /// Sets a product's price.
    #[instrument(skip(self))]
    pub async fn update_price(&self, id: &str, price: f64) -> Result<(), ApiError> {
        require(id, "product id")?;
        if !price.is_finite() || price < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "price must be a non-negative number, got {price}"
            )));
        }
        let request =
            ApiRequest::patch(PRODUCT_PRICE_ENDPOINT).with_json(&PriceUpdate { id, price })?;
        send_unit(self.client, request).await
    }

    /// Sets a product's image URL.
    #[instrument(skip(self))]
    pub async fn update_image(&self, id: &str, image: &str) -> Result<(), ApiError> {
        require(id, "product id")?;
        let request =
            ApiRequest::patch(PRODUCT_IMAGE_ENDPOINT).with_json(&ImageUpdate { id, image })?;
        send_unit(self.client, request).await
    }

    /// Deletes a product.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        require(id, "product id")?;
        let request = ApiRequest::delete(PRODUCT_ENDPOINT).with_json(&ById { id })?;
        send_unit(self.client, request).await?;
        info!("Product deleted");
        Ok(())
    }

    /// Creates a category.
    #[instrument(skip(self))]
    pub async fn create_category(&self, name: &str) -> Result<(), ApiError> {
        require(name, "category name")?;
        let request =
            ApiRequest::post(CATEGORY_ENDPOINT).with_json(&CategoryBody { id: None, name })?;
        send_unit(self.client, request).await
    }

    /// Renames a category.
    #[instrument(skip(self))]
    pub async fn rename_category(&self, id: &str, name: &str) -> Result<(), ApiError> {
        require(id, "category id")?;
        require(name, "category name")?;
        let request = ApiRequest::patch(CATEGORY_ENDPOINT).with_json(&CategoryBody {
            id: Some(id),
            name,
        })?;
        send_unit(self.client, request).await
    }

    /// Creates another admin account.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn create_admin(&self, registration: &Registration) -> Result<(), ApiError> {
        require(&registration.email, "email")?;
        let request = ApiRequest::post(ADMIN_ENDPOINT).with_json(registration)?;
        send_unit(self.client, request).await?;
        info!("Admin account created");
        Ok(())
    }

    /// Deletes a user account.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: &str) -> Result<(), ApiError> {
        require(user_id, "user id")?;
        let request = ApiRequest::post(DELETE_USER_ENDPOINT).with_json(&UserRef { user_id })?;
        send_unit(self.client, request).await
    }
}

// ============================================================================
// Tests
// ============================================================================
