//! Catalog product records.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Image variants published for every product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImages {
    pub thumbnail: String,
    pub mobile: String,
    pub tablet: String,
    pub desktop: String,
}

/// An immutable catalog entry.
///
/// `id` is the product's position in the catalog it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub images: ProductImages,
}

impl Product {
    /// Case-insensitive substring match against name or category.
    ///
    /// `needle` must already be lower-cased.
    #[must_use]
    pub fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(0),
            name: name.to_string(),
            category: category.to_string(),
            price: Price::from_cents(500),
            images: ProductImages {
                thumbnail: "thumb.jpg".to_string(),
                mobile: "mobile.jpg".to_string(),
                tablet: "tablet.jpg".to_string(),
                desktop: "desktop.jpg".to_string(),
            },
        }
    }

    #[test]
    fn test_matches_query_on_name_or_category() {
        let pie = product("Lemon Meringue Pie", "Pie");
        assert!(pie.matches_query("meringue"));
        assert!(pie.matches_query("pie"));
        assert!(!pie.matches_query("cake"));
    }

    #[test]
    fn test_matches_query_non_ascii() {
        let brulee = product("Vanilla Bean Crème Brûlée", "Crème Brûlée");
        assert!(brulee.matches_query("crème"));
        assert!(brulee.matches_query("brûlée"));
    }
}
