//! Text output formatting with colors.

use shopfront_core::{CartLine, Product, User};
use shopfront_store::CartStore;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Header row for the product listing.
    pub fn format_products_header(&self) -> String {
        self.bold(&format!("{:<12} {:<30} {:>10}  {}", "ID", "NAME", "PRICE", "STOCK"))
    }

    /// One row of the product listing.
    pub fn format_product_line(&self, product: &Product) -> String {
        let stock = match product.stock {
            None => self.dim("-"),
            Some(0) => self.red("out of stock"),
            Some(n) => self.green(&n.to_string()),
        };
        format!(
            "{:<12} {:<30} {:>10}  {}",
            product.id,
            truncate(&product.name, 30),
            format_price(product.price),
            stock
        )
    }

    /// The cart, one line per product, followed by totals.
    pub fn format_cart(&self, cart: &CartStore) -> String {
        if cart.is_empty() {
            return "Your cart is empty".to_string();
        }

        let mut lines = vec![
            self.bold(&format!(
                "{:<12} {:<24} {:>5} {:>10} {:>10}",
                "ID", "PRODUCT", "QTY", "PRICE", "SUBTOTAL"
            )),
            "─".repeat(65),
        ];
        lines.extend(cart.lines().iter().map(|line| self.format_cart_line(line)));
        lines.push("─".repeat(65));
        lines.push(format!(
            "{:<37} {:>5} {:>21}",
            self.bold("Total"),
            cart.total_items(),
            self.bold(&format_price(cart.total_price()))
        ));
        lines.join("\n")
    }

    fn format_cart_line(&self, line: &CartLine) -> String {
        let price = if line.product.is_some() {
            format_price(line.unit_price())
        } else {
            self.dim("n/a")
        };
        format!(
            "{:<12} {:<24} {:>5} {:>10} {:>10}",
            line.product_id,
            truncate(line.display_name(), 24),
            line.quantity,
            price,
            format_price(line.subtotal())
        )
    }

    /// Summary after a successful checkout.
    pub fn format_checkout(&self, items: u64, total: f64) -> String {
        format!(
            "{} {items} item(s) submitted, total {}",
            self.green("✓"),
            format_price(total)
        )
    }

    /// A user as `Name <email>`, flagged when admin.
    pub fn format_user(&self, user: &User) -> String {
        let mut out = format!("{} <{}>", self.bold(&user.name), self.cyan(&user.email));
        if user.is_admin() {
            out.push_str(" [admin]");
        }
        out
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Formats a price with two decimals.
pub fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

/// Shortens `text` to `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
