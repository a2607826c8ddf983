//! Cart line items.

use serde::{Deserialize, Serialize};

use super::{Price, Product, ProductId};

/// One product's entry in the cart.
///
/// Name, price and thumbnail are snapshots taken when the product was first
/// added; later catalog changes do not affect an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub thumbnail: String,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Start a line for `product` with a quantity of one.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            thumbnail: product.images.thumbnail.clone(),
            quantity: 1,
        }
    }

    /// Unit price multiplied by quantity, unrounded.
    ///
    /// Saturates at the largest representable price.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }

    /// Line total, or `None` if it cannot be represented.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Price> {
        self.price.checked_mul(self.quantity)
    }
}
