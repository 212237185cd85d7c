//! Cart line type.

use serde::{Deserialize, Serialize};

use super::catalog::Product;

/// One entry in the cart.
///
/// `product` is a copy of the product taken when the line was last added
/// to. It is not reconciled with the live catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product identifier; unique within a cart.
    pub product_id: String,
    /// Units of the product; always positive inside a cart.
    pub quantity: u32,
    /// Product snapshot, absent when it could not be resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

impl CartLine {
    /// Creates a line for a product.
    pub fn new(product: Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            quantity,
            product: Some(product),
        }
    }

    /// Unit price from the snapshot; 0 when there is no snapshot.
    pub fn unit_price(&self) -> f64 {
        self.product.as_ref().map_or(0.0, |p| p.price)
    }

    /// Line total: unit price times quantity.
    pub fn subtotal(&self) -> f64 {
        self.unit_price() * f64::from(self.quantity)
    }

    /// Display name from the snapshot, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.product
            .as_ref()
            .map_or(self.product_id.as_str(), |p| p.name.as_str())
    }
}
