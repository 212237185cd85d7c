//! The cart.
//!
//! [`CartStore`] owns the cart lines and writes the whole cart through its
//! [`CartPersistence`] port after every change. The lines always satisfy
//! two rules:
//!
//! - at most one line per product id, in first-added order
//! - every quantity is positive
//!
//! Operations never fail. Removing or updating an absent product does
//! nothing, and a failed save is logged and otherwise ignored. The
//! in-memory cart stays authoritative for the rest of the session.

use shopfront_core::{CartLine, CartPersistence, Product};
use tracing::{debug, warn};

/// Client-side cart with persisted lines and derived totals.
pub struct CartStore {
    lines: Vec<CartLine>,
    persistence: Box<dyn CartPersistence>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Creates an empty cart without reading the port.
    pub fn new(persistence: Box<dyn CartPersistence>) -> Self {
        Self {
            lines: Vec::new(),
            persistence,
        }
    }

    /// Restores the cart saved through `persistence`.
    ///
    /// Saved lines are normalized: lines for the same product are merged
    /// and lines with a zero quantity are dropped. An unreadable save
    /// gives an empty cart.
    pub fn load(persistence: Box<dyn CartPersistence>) -> Self {
        let lines = match persistence.load() {
            Ok(Some(saved)) => normalize(saved),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to restore cart, starting empty");
                Vec::new()
            }
        };
        debug!(lines = lines.len(), "Cart restored");
        Self { lines, persistence }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Adds `quantity` units of `product`.
    ///
    /// An existing line is incremented and its snapshot replaced by
    /// `product`; otherwise a new line is appended. Adding zero units of a
    /// product that is not in the cart does nothing.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            line.product = Some(product.clone());
        } else if quantity > 0 {
            self.lines.push(CartLine::new(product.clone(), quantity));
        } else {
            return;
        }
        debug!(product = %product.id, quantity, "Added to cart");
        self.persist();
    }

    /// Removes the line for `product_id`, if any.
    pub fn remove_item(&mut self, product_id: &str) {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        if self.lines.len() != before {
            debug!(product = product_id, "Removed from cart");
            self.persist();
        }
    }

    /// Sets the quantity of the line for `product_id`.
    ///
    /// A quantity of zero or less removes the line. Values above
    /// `u32::MAX` are clamped.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
            debug!(product = product_id, quantity, "Updated cart quantity");
            self.persist();
        }
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
        debug!("Cart cleared");
        self.persist();
    }

    /// Replaces line snapshots with fresh catalog entries.
    ///
    /// Lines whose product is missing from `catalog` keep their old
    /// snapshot. Returns the number of lines refreshed.
    pub fn refresh_snapshots(&mut self, catalog: &[Product]) -> usize {
        let mut refreshed = 0;
        for line in &mut self.lines {
            if let Some(product) = catalog.iter().find(|p| p.id == line.product_id) {
                line.product = Some(product.clone());
                refreshed += 1;
            }
        }
        if refreshed > 0 {
            self.persist();
        }
        refreshed
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Sum over lines of unit price times quantity.
    ///
    /// Lines without a snapshot contribute nothing.
    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of line quantities.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `product_id`.
    pub fn get(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.save(&self.lines) {
            warn!(error = %e, "Failed to save cart");
        }
    }
}

/// Merges duplicate product ids and drops empty lines.
fn normalize(saved: Vec<CartLine>) -> Vec<CartLine> {
    let mut lines: Vec<CartLine> = Vec::with_capacity(saved.len());
    for line in saved {
        if line.quantity == 0 {
            continue;
        }
        if let Some(existing) = lines.iter_mut().find(|l| l.product_id == line.product_id) {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
            if line.product.is_some() {
                existing.product = line.product;
            }
        } else {
            lines.push(line);
        }
    }
    lines
}

// ============================================================================
// Tests
// ============================================================================
