//! Server-side cart endpoint.

use serde::Serialize;
use shopfront_core::CartLine;
use shopfront_fetch::{ApiRequest, AuthClient};
use tracing::{info, instrument, warn};

use crate::error::ApiError;
use crate::response::send_unit;

const CART_ENDPOINT: &str = "/cart";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartEntry<'a> {
    product_id: &'a str,
    quantity: u32,
}

/// Outcome of pushing the local cart to the server.
#[derive(Debug, Default)]
pub struct CheckoutReport {
    /// Product ids accepted by the server, in order.
    pub submitted: Vec<String>,
    /// The first rejected line and why, if any.
    pub failed: Option<(String, ApiError)>,
}

impl CheckoutReport {
    /// Returns true if every line was accepted.
    pub fn is_complete(&self) -> bool {
        self.failed.is_none()
    }
}

/// Server-side cart endpoints.
#[derive(Debug, Clone, Copy)]
pub struct CartApi<'a> {
    client: &'a AuthClient,
}

impl<'a> CartApi<'a> {
    /// Creates the endpoint group over `client`.
    pub fn new(client: &'a AuthClient) -> Self {
        Self { client }
    }

    /// Adds a product to the server-side cart.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, product_id: &str, quantity: u32) -> Result<(), ApiError> {
        let request = ApiRequest::post(CART_ENDPOINT).with_json(&CartEntry {
            product_id,
            quantity,
        })?;
        send_unit(self.client, request).await
    }

    /// Pushes every line in order, stopping at the first rejection.
    ///
    /// Lines are sent one at a time; a later line is never sent before the
    /// earlier one was accepted.
    pub async fn submit_lines(&self, lines: &[CartLine]) -> CheckoutReport {
        let mut report = CheckoutReport::default();
        for line in lines {
            match self.add_to_cart(&line.product_id, line.quantity).await {
                Ok(()) => report.submitted.push(line.product_id.clone()),
                Err(e) => {
                    warn!(product = %line.product_id, error = %e, "Cart line rejected");
                    report.failed = Some((line.product_id.clone(), e));
                    return report;
                }
            }
        }
        info!(lines = report.submitted.len(), "Cart submitted");
        report
    }
}
