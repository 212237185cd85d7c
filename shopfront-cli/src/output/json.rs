//! JSON output formatting.

use anyhow::Result;
use serde::Serialize;
use shopfront_core::CartLine;
use shopfront_store::CartStore;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for the cart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartOutput<'a> {
    pub lines: Vec<CartLineOutput<'a>>,
    pub total_items: u64,
    pub total_price: f64,
}

/// A single cart line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineOutput<'a> {
    pub product_id: &'a str,
    pub name: &'a str,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
}

impl<'a> From<&'a CartLine> for CartLineOutput<'a> {
    fn from(line: &'a CartLine) -> Self {
        Self {
            product_id: &line.product_id,
            name: line.display_name(),
            quantity: line.quantity,
            unit_price: line.unit_price(),
            subtotal: line.subtotal(),
        }
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the cart with its totals.
    pub fn format_cart(&self, cart: &CartStore) -> Result<String> {
        self.format(&cart_output(cart))
    }
}

/// Builds the cart output.
pub fn cart_output(cart: &CartStore) -> CartOutput<'_> {
    CartOutput {
        lines: cart.lines().iter().map(CartLineOutput::from).collect(),
        total_items: cart.total_items(),
        total_price: cart.total_price(),
    }
}

// ============================================================================
// Tests
// ============================================================================
