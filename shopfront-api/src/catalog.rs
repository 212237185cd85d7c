//! Catalog endpoints.

use shopfront_core::Product;
use shopfront_fetch::{ApiRequest, AuthClient};
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::response::send_json;

const PRODUCT_ENDPOINT: &str = "/product";

/// Read-only catalog endpoints.
#[derive(Debug, Clone, Copy)]
pub struct CatalogApi<'a> {
    client: &'a AuthClient,
}

impl<'a> CatalogApi<'a> {
    /// Creates the endpoint group over `client`.
    pub fn new(client: &'a AuthClient) -> Self {
        Self { client }
    }

    /// Lists products, optionally filtered by name on the server.
    #[instrument(skip(self))]
    pub async fn list_products(&self, name: Option<&str>) -> Result<Vec<Product>, ApiError> {
        let mut request = ApiRequest::get(PRODUCT_ENDPOINT);
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            request = request.with_query("name", name);
        }
        let products: Vec<Product> = send_json(self.client, request).await?;
        debug!(count = products.len(), "Products fetched");
        Ok(products)
    }

    /// Looks a product up by id.
    ///
    /// The API has no single-product endpoint, so this scans the listing.
    pub async fn find_product(&self, id: &str) -> Result<Product, ApiError> {
        self.list_products(None)
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("product {id}")))
    }
}
