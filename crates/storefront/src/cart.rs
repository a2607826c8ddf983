//! The cart engine.
//!
//! [`CartEngine`] exclusively owns the ordered list of cart lines. Every
//! change goes through its operations, which keep three rules:
//!
//! - at most one line per product, kept in the order products were first added
//! - no line ever holds a quantity below 1; a line that would drop to 0 is removed
//! - count and total are derived from the lines on demand, never stored
//!
//! Each operation that changes the cart is followed, in order, by exactly one
//! write to [`CartStorage`] and one call to every subscribed listener. Listeners
//! see the cart after the change. Operations that find nothing to change
//! (unknown product, absent line) leave storage and listeners untouched.
//!
//! # Per-product lifecycle
//!
//! ```text
//! ABSENT     --add_item-------------------> PRESENT(1)
//! PRESENT(n) --add_item-------------------> PRESENT(n + 1)
//! PRESENT(n) --change_quantity(d), n+d > 0 --> PRESENT(n + d)
//! PRESENT(n) --change_quantity(d), n+d <= 0 -> ABSENT
//! PRESENT(n) --remove_item----------------> ABSENT
//! ```

use std::fmt;
use std::sync::Arc;

use dessert_cart_core::{CartLine, Price, ProductId};

use crate::catalog::Catalog;
use crate::storage::CartStorage;

/// Result of [`CartEngine::add_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended with quantity 1.
    NewLine,
    /// An existing line's quantity went up by 1.
    Incremented,
    /// The ID does not name a catalog product; nothing changed.
    UnknownProduct,
}

/// The mutation that produced a [`CartChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Added { product_id: ProductId, new_line: bool },
    QuantityChanged { product_id: ProductId, delta: i64 },
    Removed { product_id: ProductId },
    Cleared,
}

/// Notification passed to listeners after a mutation.
#[derive(Debug, Clone, Copy)]
pub struct CartChange<'a> {
    pub action: CartAction,
    pub lines: &'a [CartLine],
}

impl CartChange<'_> {
    /// Total quantity across the post-change lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        count_of(self.lines)
    }
}

type Listener = Box<dyn Fn(&CartChange<'_>) + Send + Sync>;

/// Owns the cart and applies the cart rules.
pub struct CartEngine {
    catalog: Arc<Catalog>,
    storage: CartStorage,
    lines: Vec<CartLine>,
    listeners: Vec<Listener>,
}

impl fmt::Debug for CartEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartEngine")
            .field("products", &self.catalog.len())
            .field("storage", &self.storage)
            .field("lines", &self.lines)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn count_of(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity)).sum()
}

impl CartEngine {
    /// Create an engine with an empty cart.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, storage: CartStorage) -> Self {
        Self {
            catalog,
            storage,
            lines: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Create an engine holding whatever cart `storage` has saved.
    ///
    /// Restored lines keep their saved name and price snapshots, even if the
    /// product no longer matches the catalog.
    #[must_use]
    pub fn restore(catalog: Arc<Catalog>, storage: CartStorage) -> Self {
        let lines = storage.load();
        tracing::info!(lines = lines.len(), count = count_of(&lines), "Cart restored");
        Self {
            catalog,
            storage,
            lines,
            listeners: Vec::new(),
        }
    }

    /// Register a listener called after every change.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&CartChange<'_>) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// The catalog used to resolve product IDs.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Add one unit of a catalog product.
    pub fn add_item(&mut self, product_id: ProductId) -> AddOutcome {
        let Some(product) = self.catalog.get(product_id) else {
            tracing::debug!(%product_id, "Ignoring add for unknown product");
            return AddOutcome::UnknownProduct;
        };

        let existing = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id);
        let outcome = if let Some(line) = existing {
            line.quantity = line.quantity.saturating_add(1);
            AddOutcome::Incremented
        } else {
            self.lines.push(CartLine::from_product(product));
            AddOutcome::NewLine
        };

        self.commit(CartAction::Added {
            product_id,
            new_line: outcome == AddOutcome::NewLine,
        });
        outcome
    }

    /// Adjust a line's quantity by `delta`, removing it if the result is not positive.
    ///
    /// Returns `false` (and does nothing) when the product has no line.
    pub fn change_quantity(&mut self, product_id: ProductId, delta: i64) -> bool {
        let Some(position) = self.position(product_id) else {
            return false;
        };

        let current = self.lines.get(position).map_or(0, |line| line.quantity);
        let next = i64::from(current).saturating_add(delta);
        if next <= 0 {
            self.lines.remove(position);
        } else if let Some(line) = self.lines.get_mut(position) {
            line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }

        self.commit(CartAction::QuantityChanged { product_id, delta });
        true
    }

    /// Remove a product's line regardless of quantity.
    ///
    /// Returns `false` (and does nothing) when the product has no line.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let Some(position) = self.position(product_id) else {
            return false;
        };
        self.lines.remove(position);
        self.commit(CartAction::Removed { product_id });
        true
    }

    /// Empty the cart. Always saves, so the stored snapshot becomes empty too.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.commit(CartAction::Cleared);
    }

    /// Sum of quantities; 0 for an empty cart.
    #[must_use]
    pub fn count(&self) -> u64 {
        count_of(&self.lines)
    }

    /// Sum of price times quantity, unrounded.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Lines in the order they were added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity held for a product, if it has a line.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map(|line| line.quantity)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product_id == product_id)
    }

    fn commit(&self, action: CartAction) {
        self.storage.save(&self.lines);

        let change = CartChange {
            action,
            lines: &self.lines,
        };
        for listener in &self.listeners {
            listener(&change);
        }
    }
}
