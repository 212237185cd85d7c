//! Serde tests for the wire and persisted shapes.
//!
//! The remote API speaks camelCase JSON; these tests pin the field names so
//! a rename on our side can't silently break decoding.

use serde_json::json;

use crate::{
    CartLine, Category, Credentials, LoginResponse, NewProduct, Product, RefreshResponse,
    Registration, SessionState, User,
};

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_product_deserialize_api_shape() {
    let value = json!({
        "id": "p1",
        "name": "Mug",
        "description": "Ceramic mug",
        "price": 12.5,
        "image": "https://cdn.example.com/mug.png",
        "categoryId": "kitchen",
        "stock": 4
    });

    let product: Product = serde_json::from_value(value).unwrap();
    assert_eq!(product.id, "p1");
    assert_eq!(product.category_id, "kitchen");
    assert_eq!(product.stock, Some(4));
    assert!((product.price - 12.5).abs() < f64::EPSILON);
}

#[test]
fn test_product_optional_fields_default() {
    let product: Product =
        serde_json::from_value(json!({"id": "p2", "name": "Plate", "price": 3})).unwrap();
    assert_eq!(product.description, "");
    assert_eq!(product.image, "");
    assert_eq!(product.stock, None);
}

#[test]
fn test_product_omits_missing_stock() {
    let product = Product::new("p1", "Mug", 1.0);
    let value = serde_json::to_value(&product).unwrap();
    assert!(value.get("stock").is_none());
    assert_eq!(value["categoryId"], "");
}

#[test]
fn test_new_product_serializes_camel_case() {
    let payload = NewProduct {
        name: "Mug".to_string(),
        description: "Ceramic".to_string(),
        price: 9.99,
        image: "img".to_string(),
        category_id: "kitchen".to_string(),
        stock: None,
    };
    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value["categoryId"], "kitchen");
    assert!(value.get("stock").is_none());
}

#[test]
fn test_category_roundtrip() {
    let category = Category {
        id: "c1".to_string(),
        name: "Kitchen".to_string(),
    };
    let json = serde_json::to_string(&category).unwrap();
    assert_eq!(serde_json::from_str::<Category>(&json).unwrap(), category);
}

// ============================================================================
// Accounts
// ============================================================================

#[test]
fn test_login_response_deserialize() {
    let value = json!({
        "accessToken": "at",
        "refreshToken": "rt",
        "user": {"id": "u1", "email": "a@b.c", "name": "Ada", "role": "admin"}
    });

    let login: LoginResponse = serde_json::from_value(value).unwrap();
    assert_eq!(login.access_token, "at");
    assert_eq!(login.refresh_token, "rt");
    assert!(login.user.is_admin());

    let credentials = Credentials::from(&login);
    assert_eq!(credentials, Credentials::new("at", "rt"));
}

#[test]
fn test_user_without_role_is_not_admin() {
    let user: User =
        serde_json::from_value(json!({"id": "u1", "email": "a@b.c", "name": "Ada"})).unwrap();
    assert!(!user.is_admin());
}

#[test]
fn test_refresh_response_deserialize() {
    let refresh: RefreshResponse =
        serde_json::from_value(json!({"accessToken": "fresh"})).unwrap();
    assert_eq!(refresh.access_token, "fresh");
}

#[test]
fn test_secrets_are_redacted_in_debug() {
    let credentials = Credentials::new("secret-access", "secret-refresh");
    let debug = format!("{credentials:?}");
    assert!(!debug.contains("secret-access"));
    assert!(!debug.contains("secret-refresh"));

    let registration = Registration {
        email: "a@b.c".to_string(),
        password: "hunter2".to_string(),
        name: "Ada".to_string(),
    };
    assert!(!format!("{registration:?}").contains("hunter2"));
}

// ============================================================================
// Cart & Session
// ============================================================================

#[test]
fn test_cart_line_persisted_shape() {
    let line = CartLine::new(Product::new("p1", "Mug", 10.0), 2);
    let value = serde_json::to_value(&line).unwrap();
    assert_eq!(value["productId"], "p1");
    assert_eq!(value["quantity"], 2);
    assert_eq!(value["product"]["name"], "Mug");
}

#[test]
fn test_cart_line_without_snapshot() {
    let line: CartLine =
        serde_json::from_value(json!({"productId": "p9", "quantity": 3})).unwrap();
    assert!(line.product.is_none());
    assert_eq!(line.unit_price(), 0.0);
    assert_eq!(line.subtotal(), 0.0);
    assert_eq!(line.display_name(), "p9");
}

#[test]
fn test_session_state_serde() {
    assert_eq!(
        serde_json::to_string(&SessionState::LoginRequired).unwrap(),
        r#""login_required""#
    );
}
