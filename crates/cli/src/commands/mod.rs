//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod order;

use std::sync::Arc;

use dessert_cart_core::ProductId;
use dessert_cart_storefront::cart::CartEngine;
use dessert_cart_storefront::catalog::{Catalog, CatalogError};
use dessert_cart_storefront::config::{ConfigError, StorefrontConfig};
use dessert_cart_storefront::storage::{CartStorage, open_store};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The catalog failed to load.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// The product ID is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// The product has no line in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// An order cannot be confirmed without items.
    #[error("Cart is empty")]
    EmptyCart,
}

/// Loaded configuration and catalog shared by all commands.
pub struct Context {
    config: StorefrontConfig,
    catalog: Result<Arc<Catalog>, CatalogError>,
}

impl Context {
    /// Load configuration from the environment and the catalog it names.
    ///
    /// A catalog failure is kept rather than returned, so cart commands still
    /// work on a restored cart.
    pub async fn from_env() -> Result<Self, CliError> {
        let config = StorefrontConfig::from_env()?;
        let catalog = Catalog::load(&config.catalog).await.map(Arc::new);
        if let Err(e) = &catalog {
            tracing::warn!(source = %config.catalog, error = %e, "Failed to load catalog");
        }
        Ok(Self { config, catalog })
    }

    /// The loaded catalog.
    pub fn catalog(&self) -> Result<&Catalog, CliError> {
        self.catalog
            .as_deref()
            .map_err(|e| CliError::CatalogUnavailable(e.to_string()))
    }

    /// Restore the saved cart into an engine backed by the configured store.
    pub fn engine(&self) -> CartEngine {
        let catalog = self.catalog.as_ref().map_or_else(|_| Arc::default(), Arc::clone);
        let storage = CartStorage::new(
            open_store(&self.config.store_path),
            self.config.cart_key.clone(),
        );
        CartEngine::restore(catalog, storage)
    }
}
