//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Full page: filters, search, product grid, cart panel
//! GET  /health            - Liveness check
//! GET  /health/ready      - Readiness check (503 without a catalog)
//!
//! # Browsing (HTMX fragments)
//! GET  /products          - Product grid fragment (?category=&q=)
//!
//! # Cart (HTMX fragments)
//! GET  /cart              - Cart panel fragment
//! GET  /cart/count        - Cart count badge fragment
//! POST /cart/add          - Add one unit (returns cart panel, triggers cart-updated)
//! POST /cart/update       - Change quantity by delta (returns cart panel, triggers cart-updated)
//! POST /cart/remove       - Remove line (returns cart panel, triggers cart-updated)
//!
//! # Order
//! POST /order/confirm     - Order confirmation modal fragment
//! POST /order/new         - Clear the cart and close the modal
//! ```

pub mod cart;
pub mod home;
pub mod order;

use axum::{
    Router,
    extract::State,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/confirm", post(order::confirm))
        .route("/new", post(order::start_new))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::index))
        .route("/products", get(home::products))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        // Cart routes
        .nest("/cart", cart_routes())
        // Order confirmation
        .nest("/order", order_routes())
        .fallback(not_found)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the catalog did not load.
async fn readiness(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state
        .catalog()
        .map(|_| "ok")
        .ok_or(AppError::CatalogUnavailable)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
