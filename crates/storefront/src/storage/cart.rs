//! Cart snapshot persistence.

use std::collections::HashSet;
use std::sync::Arc;

use dessert_cart_core::{CartLine, Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{KeyValueStore, StoreError};

/// On-disk shape of one cart line.
///
/// Unknown fields are rejected so that a snapshot written by a different
/// layout is discarded as a whole rather than half-trusted.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredLine {
    id: ProductId,
    name: String,
    price: Price,
    image: String,
    quantity: u32,
}

impl From<&CartLine> for StoredLine {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product_id,
            name: line.name.clone(),
            price: line.price,
            image: line.thumbnail.clone(),
            quantity: line.quantity,
        }
    }
}

impl From<StoredLine> for CartLine {
    fn from(stored: StoredLine) -> Self {
        Self {
            product_id: stored.id,
            name: stored.name,
            price: stored.price,
            thumbnail: stored.image,
            quantity: stored.quantity,
        }
    }
}

/// Reasons a stored snapshot is rejected.
#[derive(Debug, Error)]
enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
    #[error("product {0} appears on more than one line")]
    DuplicateLine(ProductId),
    #[error("cart total is too large to represent")]
    TotalOverflow,
}

fn decode(raw: &str) -> Result<Vec<CartLine>, SnapshotError> {
    let stored: Vec<StoredLine> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(stored.len());
    for line in &stored {
        if line.quantity == 0 {
            return Err(SnapshotError::ZeroQuantity(line.id));
        }
        if !seen.insert(line.id) {
            return Err(SnapshotError::DuplicateLine(line.id));
        }
    }

    let lines: Vec<CartLine> = stored.into_iter().map(CartLine::from).collect();
    lines
        .iter()
        .try_fold(Price::ZERO, |total, line| {
            line.checked_line_total()
                .and_then(|line_total| total.checked_add(line_total))
        })
        .ok_or(SnapshotError::TotalOverflow)?;
    Ok(lines)
}

/// Saves and restores the cart under a single named store entry.
#[derive(Clone)]
pub struct CartStorage {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for CartStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStorage")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl CartStorage {
    /// Entry name used when none is configured.
    pub const DEFAULT_KEY: &'static str = "dessertCart";

    /// Create an adapter writing to `key` in `store`.
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Restore the saved cart.
    ///
    /// Returns an empty cart when nothing is stored, the store cannot be
    /// read, or the stored value fails to decode or validate.
    #[must_use]
    pub fn load(&self) -> Vec<CartLine> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Could not read saved cart");
                return Vec::new();
            }
        };

        match decode(&raw) {
            Ok(lines) => {
                tracing::debug!(key = %self.key, lines = lines.len(), "Restored saved cart");
                lines
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Discarding saved cart");
                Vec::new()
            }
        }
    }

    /// Write the cart, propagating store failures.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if serialization or the store write fails.
    pub fn try_save(&self, lines: &[CartLine]) -> Result<(), StoreError> {
        let stored: Vec<StoredLine> = lines.iter().map(StoredLine::from).collect();
        let raw = serde_json::to_string(&stored)?;
        self.store.set(&self.key, &raw)
    }

    /// Write the cart, logging and swallowing store failures.
    ///
    /// The in-memory cart stays authoritative when this fails.
    pub fn save(&self, lines: &[CartLine]) {
        match self.try_save(lines) {
            Ok(()) => tracing::debug!(key = %self.key, lines = lines.len(), "Cart saved"),
            Err(e) => tracing::warn!(key = %self.key, error = %e, "Could not save cart"),
        }
    }
}
