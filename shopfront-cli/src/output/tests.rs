//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::{TextFormatter, format_price, truncate};
    use shopfront_core::{MemoryCartPersistence, Product, User};
    use shopfront_store::CartStore;

    fn cart() -> CartStore {
        let mut cart = CartStore::new(Box::new(MemoryCartPersistence::new()));
        cart.add_item(&Product::new("p1", "Coffee Mug", 10.0), 2);
        cart.add_item(&Product::new("p2", "Plate", 4.25), 1);
        cart
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(10.0), "10.00");
        assert_eq!(format_price(4.255), "4.25");
        assert_eq!(format_price(0.0), "0.00");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Mug", 10), "Mug");
        assert_eq!(truncate("Extremely long name", 8), "Extreme…");
        assert_eq!(truncate("Tasse à café", 12), "Tasse à café");
    }

    #[test]
    fn test_empty_cart() {
        let formatter = TextFormatter::new(false);
        let empty = CartStore::new(Box::new(MemoryCartPersistence::new()));
        assert_eq!(formatter.format_cart(&empty), "Your cart is empty");
    }

    #[test]
    fn test_cart_lines_and_totals() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_cart(&cart());

        assert!(output.contains("Coffee Mug"));
        assert!(output.contains("20.00"));
        assert!(output.contains("24.25"));
        let total_line = output.lines().last().unwrap();
        assert!(total_line.starts_with("Total"));
        assert!(total_line.contains(" 3 "));
    }

    #[test]
    fn test_cart_without_colors_has_no_escapes() {
        let formatter = TextFormatter::new(false);
        assert!(!formatter.format_cart(&cart()).contains('\x1b'));
    }

    #[test]
    fn test_product_line_out_of_stock() {
        let formatter = TextFormatter::new(true);
        let mut product = Product::new("p1", "Mug", 5.0);
        product.stock = Some(0);

        let line = formatter.format_product_line(&product);
        assert!(line.contains("out of stock"));
        assert!(line.contains("\x1b[31m"), "Should be red when out of stock");
    }

    #[test]
    fn test_format_user_marks_admin() {
        let formatter = TextFormatter::new(false);
        let user = User {
            id: "u1".into(),
            email: "root@example.com".into(),
            name: "Root".into(),
            role: Some("admin".into()),
        };
        assert_eq!(formatter.format_user(&user), "Root <root@example.com> [admin]");
    }

    #[test]
    fn test_format_checkout() {
        let formatter = TextFormatter::new(false);
        assert_eq!(
            formatter.format_checkout(3, 24.25),
            "✓ 3 item(s) submitted, total 24.25"
        );
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::{JsonFormatter, cart_output};
    use shopfront_core::{MemoryCartPersistence, Product};
    use shopfront_store::CartStore;

    #[test]
    fn test_cart_json_shape() {
        let mut cart = CartStore::new(Box::new(MemoryCartPersistence::new()));
        cart.add_item(&Product::new("p1", "Mug", 10.0), 2);
        cart.add_item(&Product::new("p1", "Mug", 10.0), 1);

        let json: serde_json::Value =
            serde_json::from_str(&JsonFormatter::new(false).format_cart(&cart).unwrap()).unwrap();

        assert_eq!(json["totalItems"], 3);
        assert_eq!(json["totalPrice"], 30.0);
        assert_eq!(json["lines"][0]["productId"], "p1");
        assert_eq!(json["lines"][0]["subtotal"], 30.0);
    }

    #[test]
    fn test_empty_cart_output() {
        let cart = CartStore::new(Box::new(MemoryCartPersistence::new()));
        let output = cart_output(&cart);
        assert!(output.lines.is_empty());
        assert_eq!(output.total_items, 0);
    }
}
