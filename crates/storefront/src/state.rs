//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::cart::{CartAction, CartChange, CartEngine};
use crate::catalog::Catalog;
use crate::error::{AppError, add_breadcrumb};
use crate::filter::compute_categories;
use crate::storage::CartStorage;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cart engine sits behind a
/// mutex that each handler holds for one whole operation and render, so a
/// render always observes the state its own mutation produced.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Option<Arc<Catalog>>,
    categories: Vec<String>,
    cart: Mutex<CartEngine>,
}

impl AppState {
    /// Create the application state.
    ///
    /// # Arguments
    ///
    /// * `catalog` - The loaded catalog, or `None` if loading failed
    /// * `storage` - Where the cart is restored from and saved to
    #[must_use]
    pub fn new(catalog: Option<Catalog>, storage: CartStorage) -> Self {
        let catalog = catalog.map(Arc::new);
        let categories = catalog
            .as_deref()
            .map(compute_categories)
            .unwrap_or_default();

        // Without a catalog nothing can be added, but a restored cart can
        // still be viewed, adjusted and confirmed.
        let engine_catalog = catalog.clone().unwrap_or_default();
        let mut cart = CartEngine::restore(engine_catalog, storage);
        cart.subscribe(record_cart_change);

        Self {
            inner: Arc::new(AppStateInner {
                catalog,
                categories,
                cart: Mutex::new(cart),
            }),
        }
    }

    /// The catalog, or `None` if it failed to load.
    #[must_use]
    pub fn catalog(&self) -> Option<&Arc<Catalog>> {
        self.inner.catalog.as_ref()
    }

    /// Category filter labels, `"All"` first. Empty without a catalog.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.inner.categories
    }

    /// Lock the cart engine for one operation.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if a previous handler panicked while
    /// holding the lock.
    pub fn cart(&self) -> Result<MutexGuard<'_, CartEngine>, AppError> {
        self.inner
            .cart
            .lock()
            .map_err(|e| AppError::Internal(format!("cart lock poisoned: {e}")))
    }
}

/// Log each cart change and leave a Sentry breadcrumb for it.
fn record_cart_change(change: &CartChange<'_>) {
    let count = change.count().to_string();
    match change.action {
        CartAction::Added {
            product_id,
            new_line,
        } => {
            tracing::info!(%product_id, new_line, count = %count, "Cart item added");
            let id = product_id.to_string();
            add_breadcrumb(
                "cart",
                "Added item",
                Some(&[("product_id", id.as_str()), ("count", count.as_str())]),
            );
        }
        CartAction::QuantityChanged { product_id, delta } => {
            tracing::info!(%product_id, delta, count = %count, "Cart quantity changed");
            let id = product_id.to_string();
            let delta = delta.to_string();
            add_breadcrumb(
                "cart",
                "Changed quantity",
                Some(&[
                    ("product_id", id.as_str()),
                    ("delta", delta.as_str()),
                    ("count", count.as_str()),
                ]),
            );
        }
        CartAction::Removed { product_id } => {
            tracing::info!(%product_id, count = %count, "Cart item removed");
            let id = product_id.to_string();
            add_breadcrumb(
                "cart",
                "Removed item",
                Some(&[("product_id", id.as_str()), ("count", count.as_str())]),
            );
        }
        CartAction::Cleared => {
            tracing::info!("Cart cleared");
            add_breadcrumb("cart", "Cleared cart", None);
        }
    }
}
