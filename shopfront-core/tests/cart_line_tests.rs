//! Integration tests for core cart and catalog types.

use shopfront_core::{CartLine, Product};

#[test]
fn test_cart_line_subtotal() {
    let line = CartLine::new(Product::new("p1", "Mug", 10.0), 3);
    assert!((line.subtotal() - 30.0).abs() < f64::EPSILON);
    assert_eq!(line.display_name(), "Mug");
}

#[test]
fn test_cart_line_serialization_roundtrip() {
    let line = CartLine::new(Product::new("p1", "Mug", 10.0), 2);
    let json = serde_json::to_string(&line).unwrap();
    let parsed: CartLine = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, line);
}
