//! Integration tests for Dessert Cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p dessert-cart-integration-tests
//! ```
//!
//! Tests drive the full storefront router in-process with
//! `tower::ServiceExt::oneshot`; no server or network is involved. The cart
//! is kept in a [`MemoryStore`] the test can inspect directly.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use dessert_cart_storefront::catalog::Catalog;
use dessert_cart_storefront::routes;
use dessert_cart_storefront::state::AppState;
use dessert_cart_storefront::storage::{CartStorage, KeyValueStore, MemoryStore};
use tower::ServiceExt;

/// The catalog shipped with the application.
pub const CATALOG_JSON: &str = include_str!("../../../data/data.json");

/// A storefront router wired to an inspectable in-memory store.
pub struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
}

/// A buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Whether the response asks the page to refresh cart-dependent views.
    #[must_use]
    pub fn triggers_cart_update(&self) -> bool {
        self.headers
            .get("HX-Trigger")
            .is_some_and(|value| *value == "cart-updated")
    }
}

impl TestApp {
    /// App with the bundled catalog and an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// App with the bundled catalog, restoring whatever `store` holds.
    #[must_use]
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        let catalog = Catalog::from_json(CATALOG_JSON).expect("bundled catalog parses");
        Self::build(Some(catalog), store)
    }

    /// App whose catalog failed to load.
    #[must_use]
    pub fn without_catalog(store: Arc<MemoryStore>) -> Self {
        Self::build(None, store)
    }

    fn build(catalog: Option<Catalog>, store: Arc<MemoryStore>) -> Self {
        let storage = CartStorage::new(store.clone(), CartStorage::DEFAULT_KEY);
        let router = routes::routes().with_state(AppState::new(catalog, storage));
        Self { router, store }
    }

    /// The backing store, shared with the app.
    #[must_use]
    pub fn store(&self) -> Arc<MemoryStore> {
        Arc::clone(&self.store)
    }

    /// The persisted cart snapshot, parsed.
    #[must_use]
    pub fn saved_cart(&self) -> Option<serde_json::Value> {
        self.store
            .get(CartStorage::DEFAULT_KEY)
            .expect("memory store reads")
            .map(|raw| serde_json::from_str(&raw).expect("snapshot is JSON"))
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    /// Send a form-encoded POST request.
    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_owned()))
            .expect("valid request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let Ok(response) = self.router.clone().oneshot(request).await;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).expect("body is UTF-8"),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
