//! Integration tests for the cart and order flow.
//!
//! Every mutation must answer with the re-rendered cart panel, ask the page
//! to refresh (`HX-Trigger: cart-updated`) and leave the saved snapshot in
//! step with what was rendered.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::StatusCode;
use dessert_cart_integration_tests::TestApp;
use dessert_cart_storefront::storage::{CartStorage, KeyValueStore, MemoryStore};

// =============================================================================
// Cart Mutations
// =============================================================================

#[tokio::test]
async fn test_empty_cart_panel() {
    let app = TestApp::new();

    let res = app.get("/cart").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Your Cart (0)"));
    assert!(res.body.contains("Your cart is empty"));
    assert!(res.body.contains("$0.00"));
    assert!(!res.body.contains("Confirm Order"));
    assert!(app.saved_cart().is_none());
}

#[tokio::test]
async fn test_add_new_line_then_increment() {
    let app = TestApp::new();

    let res = app.post_form("/cart/add", "product_id=0").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.triggers_cart_update());
    assert!(res.body.contains("cart-item fade-in"));
    assert!(res.body.contains("Waffle with Berries"));

    let res = app.post_form("/cart/add", "product_id=0").await;
    assert!(res.body.contains("Your Cart (2)"));
    assert!(res.body.contains("2x"));
    assert!(res.body.contains("$13.00"));
    assert!(res.body.contains("Confirm Order"));
    // Incrementing an existing line is not a new line.
    assert!(!res.body.contains("fade-in"));

    let saved = app.saved_cart().unwrap();
    assert_eq!(saved.as_array().unwrap().len(), 1);
    assert_eq!(saved[0]["id"], 0);
    assert_eq!(saved[0]["quantity"], 2);
    assert_eq!(saved[0]["name"], "Waffle with Berries");
}

#[tokio::test]
async fn test_add_unknown_product_changes_nothing() {
    let app = TestApp::new();

    let res = app.post_form("/cart/add", "product_id=99").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Your Cart (0)"));
    assert!(app.saved_cart().is_none());
}

#[tokio::test]
async fn test_out_of_range_product_ids_change_nothing() {
    let app = TestApp::new();
    app.post_form("/cart/add", "product_id=0").await;

    for id in ["-1", "4294967296"] {
        let res = app.post_form("/cart/add", &format!("product_id={id}")).await;
        assert_eq!(res.status, StatusCode::OK, "add {id}");
        assert!(res.body.contains("Your Cart (1)"));

        let res = app
            .post_form("/cart/update", &format!("product_id={id}&delta=1"))
            .await;
        assert_eq!(res.status, StatusCode::OK, "update {id}");
        assert!(res.body.contains("Your Cart (1)"));

        let res = app.post_form("/cart/remove", &format!("product_id={id}")).await;
        assert_eq!(res.status, StatusCode::OK, "remove {id}");
        assert!(res.body.contains("Your Cart (1)"));
    }

    let saved = app.saved_cart().unwrap();
    assert_eq!(saved.as_array().unwrap().len(), 1);
    assert_eq!(saved[0]["quantity"], 1);
}

#[tokio::test]
async fn test_malformed_product_id_is_rejected() {
    let app = TestApp::new();

    let res = app.post_form("/cart/add", "product_id=waffle").await;
    assert!(res.status.is_client_error());
    assert!(app.saved_cart().is_none());
}

#[tokio::test]
async fn test_scenario_add_add_add_decrement() {
    let app = TestApp::new();

    app.post_form("/cart/add", "product_id=0").await;
    app.post_form("/cart/add", "product_id=0").await;
    app.post_form("/cart/add", "product_id=1").await;
    let res = app.post_form("/cart/update", "product_id=1&delta=-1").await;

    assert!(res.triggers_cart_update());
    assert!(res.body.contains("Your Cart (2)"));
    assert!(res.body.contains("$13.00"));
    assert!(!res.body.contains("Crème Brûlée"));

    let saved = app.saved_cart().unwrap();
    assert_eq!(saved.as_array().unwrap().len(), 1);
    assert_eq!(saved[0]["id"], 0);
    assert_eq!(saved[0]["quantity"], 2);
}

#[tokio::test]
async fn test_update_by_more_than_one() {
    let app = TestApp::new();

    app.post_form("/cart/add", "product_id=2").await;
    let res = app.post_form("/cart/update", "product_id=2&delta=3").await;
    assert!(res.body.contains("Your Cart (4)"));
    assert!(res.body.contains("$32.00"));

    let res = app.post_form("/cart/update", "product_id=2&delta=-10").await;
    assert!(res.body.contains("Your Cart (0)"));
    assert_eq!(app.saved_cart().unwrap(), serde_json::json!([]));
}

#[tokio::test]
async fn test_remove_line() {
    let app = TestApp::new();

    app.post_form("/cart/add", "product_id=3").await;
    app.post_form("/cart/add", "product_id=4").await;
    let res = app.post_form("/cart/remove", "product_id=3").await;

    assert!(res.triggers_cart_update());
    assert!(res.body.contains("Your Cart (1)"));
    assert!(!res.body.contains("Classic Tiramisu"));
    assert!(res.body.contains("Pistachio Baklava"));

    let saved = app.saved_cart().unwrap();
    assert_eq!(saved[0]["id"], 4);
}

#[tokio::test]
async fn test_cart_count_badge() {
    let app = TestApp::new();

    app.post_form("/cart/add", "product_id=5").await;
    app.post_form("/cart/add", "product_id=5").await;
    app.post_form("/cart/add", "product_id=6").await;

    let res = app.get("/cart/count").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains(">3</span>"));
}

// =============================================================================
// Persistence Across Restarts
// =============================================================================

#[tokio::test]
async fn test_cart_restored_from_store() {
    let first = TestApp::new();
    first.post_form("/cart/add", "product_id=7").await;
    first.post_form("/cart/add", "product_id=8").await;
    first.post_form("/cart/add", "product_id=8").await;

    let second = TestApp::with_store(first.store());
    let res = second.get("/cart").await;
    assert!(res.body.contains("Your Cart (3)"));
    assert!(res.body.contains("Salted Caramel Brownie"));
    assert!(res.body.contains("Vanilla Panna Cotta"));
    // 5.50 + 2 * 6.50
    assert!(res.body.contains("$18.50"));
}

#[tokio::test]
async fn test_unrepresentable_saved_cart_is_discarded() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            CartStorage::DEFAULT_KEY,
            r#"[{"id":0,"name":"Waffle with Berries","price":"50000000000000000000000000000","image":"w.jpg","quantity":2}]"#,
        )
        .unwrap();

    let app = TestApp::with_store(store);
    let res = app.get("/cart").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Your Cart (0)"));

    // The session keeps working afterwards.
    let res = app.post_form("/cart/add", "product_id=0").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Your Cart (1)"));
    assert!(res.body.contains("$6.50"));
}

#[tokio::test]
async fn test_cart_usable_without_catalog() {
    let first = TestApp::new();
    first.post_form("/cart/add", "product_id=0").await;

    let second = TestApp::without_catalog(first.store());
    let res = second.get("/cart").await;
    assert!(res.body.contains("Your Cart (1)"));

    let res = second.post_form("/cart/update", "product_id=0&delta=1").await;
    assert!(res.body.contains("Your Cart (2)"));

    // Nothing new can be added without a catalog.
    let res = second.post_form("/cart/add", "product_id=1").await;
    assert!(res.body.contains("Your Cart (2)"));
}

// =============================================================================
// Order Confirmation
// =============================================================================

#[tokio::test]
async fn test_confirm_empty_cart_is_refused() {
    let app = TestApp::new();

    let res = app.post_form("/order/confirm", "").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_confirm_then_start_new_order() {
    let app = TestApp::new();
    app.post_form("/cart/add", "product_id=0").await;
    app.post_form("/cart/add", "product_id=1").await;

    let res = app.post_form("/order/confirm", "").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Order Confirmed"));
    assert!(res.body.contains("Waffle with Berries"));
    assert!(res.body.contains("Vanilla Bean Crème Brûlée"));
    assert!(res.body.contains("$13.50"));
    // Confirming alone does not empty the cart.
    assert_eq!(app.saved_cart().unwrap().as_array().unwrap().len(), 2);

    let res = app.post_form("/order/new", "").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.triggers_cart_update());
    assert!(res.body.contains("Your Cart (0)"));
    assert!(res.body.contains(r#"id="modal-root" hx-swap-oob="true""#));
    assert_eq!(app.saved_cart().unwrap(), serde_json::json!([]));
}
