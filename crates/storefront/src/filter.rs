//! Category and text filtering over the catalog.

use std::collections::HashSet;
use std::fmt;

use dessert_cart_core::Product;

use crate::catalog::Catalog;

/// Label of the pseudo-category that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// Category selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// `"All"` (or an empty value) selects everything; anything else is an exact category name.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Named(name) => name,
        }
    }

    fn accepts(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => product.category == *name,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `"All"` followed by each distinct category in first-seen catalog order.
#[must_use]
pub fn compute_categories(catalog: &Catalog) -> Vec<String> {
    let mut seen = HashSet::new();
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(
            catalog
                .products()
                .iter()
                .filter(|product| seen.insert(product.category.as_str()))
                .map(|product| product.category.clone()),
        )
        .collect()
}

/// Products passing the current filters, in catalog order.
#[derive(Debug, Clone)]
pub struct FilterResult<'a> {
    pub products: Vec<&'a Product>,
    pub category: CategoryFilter,
    /// Trimmed, lower-cased query; empty when no text search is active.
    pub query: String,
}

impl FilterResult<'_> {
    /// Whether a category or text filter narrowed the catalog.
    #[must_use]
    pub fn filters_applied(&self) -> bool {
        self.category != CategoryFilter::All || !self.query.is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Summary shown above the grid while a filter is active.
    ///
    /// Returns `None` when nothing is filtered.
    #[must_use]
    pub fn results_message(&self) -> Option<String> {
        if !self.filters_applied() {
            return None;
        }

        let count = self.products.len();
        let mut message = if count == 0 {
            let mut text = "No desserts found".to_string();
            if !self.query.is_empty() {
                text.push_str(&format!(" for \"{}\"", self.query));
            }
            text
        } else {
            let plural = if count == 1 { "" } else { "s" };
            let mut text = format!("Showing {count} dessert{plural}");
            if !self.query.is_empty() {
                text.push_str(&format!(" matching \"{}\"", self.query));
            }
            text
        };
        if let CategoryFilter::Named(name) = &self.category {
            message.push_str(&format!(" in {name} category"));
        }
        Some(message)
    }
}

/// Apply the category filter and the text query (both must match).
///
/// The query is trimmed and matched case-insensitively against product name
/// or category; an empty query matches everything.
#[must_use]
pub fn filter<'a>(catalog: &'a Catalog, category: &CategoryFilter, query: &str) -> FilterResult<'a> {
    let needle = query.trim().to_lowercase();
    let products = catalog
        .products()
        .iter()
        .filter(|product| category.accepts(product))
        .filter(|product| needle.is_empty() || product.matches_query(&needle))
        .collect();

    FilterResult {
        products,
        category: category.clone(),
        query: needle,
    }
}
