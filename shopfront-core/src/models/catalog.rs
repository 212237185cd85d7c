//! Catalog types.
//!
//! - [`Product`] - A product listed by the store
//! - [`Category`] - A product category
//! - [`NewProduct`] - Create payload for the admin surface

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Product
// ============================================================================

/// A product as returned by `GET /product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Owning category.
    #[serde(default)]
    pub category_id: String,
    /// Units in stock, when the API reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl Product {
    /// Creates a product with only the fields the cart cares about.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            category_id: String::new(),
            stock: None,
        }
    }

    /// Returns true if the API reports the product as out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == Some(0)
    }
}

// ============================================================================
// Category
// ============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

// ============================================================================
// New Product
// ============================================================================

/// Payload for `POST /product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    pub image: String,
    /// Owning category.
    pub category_id: String,
    /// Initial stock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl NewProduct {
    /// Checks the payload before it is sent.
    ///
    /// The API rejects these too; checking locally gives a clearer message.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidData("product name is required".to_string()));
        }
        if self.category_id.trim().is_empty() {
            return Err(CoreError::InvalidData("category id is required".to_string()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CoreError::InvalidData(format!(
                "price must be a non-negative number, got {}",
                self.price
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product() -> NewProduct {
        NewProduct {
            name: "Mug".to_string(),
            description: "Ceramic".to_string(),
            price: 12.5,
            image: String::new(),
            category_id: "kitchen".to_string(),
            stock: Some(3),
        }
    }

    #[test]
    fn test_out_of_stock() {
        let mut product = Product::new("p1", "Mug", 9.0);
        assert!(!product.is_out_of_stock());
        product.stock = Some(0);
        assert!(product.is_out_of_stock());
    }

    #[test]
    fn test_new_product_validation() {
        assert!(new_product().validate().is_ok());

        let mut bad = new_product();
        bad.name = "  ".to_string();
        assert!(bad.validate().is_err());

        let mut bad = new_product();
        bad.price = -1.0;
        assert!(bad.validate().is_err());

        let mut bad = new_product();
        bad.price = f64::NAN;
        assert!(bad.validate().is_err());

        let mut bad = new_product();
        bad.category_id = String::new();
        assert!(bad.validate().is_err());
    }
}
