//! View models rendered by templates and the CLI.
//!
//! Views are plain data derived from the cart engine and a filter result.
//! Prices are formatted here so templates never do arithmetic.

use dessert_cart_core::{CartLine, Product, ProductId, ProductImages};

use crate::cart::CartEngine;
use crate::filter::{CategoryFilter, FilterResult};

/// Upper bound (inclusive, CSS pixels) of the mobile layout.
pub const MOBILE_MAX_WIDTH: u32 = 480;
/// Upper bound (inclusive, CSS pixels) of the tablet layout.
pub const TABLET_MAX_WIDTH: u32 = 768;

/// Shown instead of the grid when the catalog failed to load.
pub const CATALOG_ERROR_MESSAGE: &str =
    "Sorry, there was an error loading the products. Please try again later.";

/// Layout class for a viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    Mobile,
    Tablet,
    Desktop,
}

impl Viewport {
    #[must_use]
    pub const fn for_width(width: u32) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            Self::Mobile
        } else if width <= TABLET_MAX_WIDTH {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    /// The image variant this layout displays.
    #[must_use]
    pub fn image<'a>(&self, images: &'a ProductImages) -> &'a str {
        match self {
            Self::Mobile => &images.mobile,
            Self::Tablet => &images.tablet,
            Self::Desktop => &images.desktop,
        }
    }
}

/// Category filter button.
#[derive(Debug, Clone)]
pub struct CategoryButtonView {
    pub name: String,
    pub active: bool,
}

/// Build the filter buttons, marking the selected one.
#[must_use]
pub fn category_buttons(categories: &[String], selected: &CategoryFilter) -> Vec<CategoryButtonView> {
    categories
        .iter()
        .map(|name| CategoryButtonView {
            name: name.clone(),
            active: name == selected.as_str(),
        })
        .collect()
}

/// Product card in the grid.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: String,
    pub mobile_image: String,
    pub tablet_image: String,
    pub desktop_image: String,
    /// Quantity in the cart; `None` shows the "Add to Cart" control.
    pub quantity: Option<u32>,
}

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product, cart: &CartEngine) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            mobile_image: product.images.mobile.clone(),
            tablet_image: product.images.tablet.clone(),
            desktop_image: product.images.desktop.clone(),
            quantity: cart.quantity_of(product.id),
        }
    }
}

/// The product grid plus the filter summary.
#[derive(Debug, Clone)]
pub struct ProductGridView {
    pub cards: Vec<ProductCardView>,
    pub message: Option<String>,
    pub category: String,
    pub query: String,
}

impl ProductGridView {
    #[must_use]
    pub fn new(result: &FilterResult<'_>, cart: &CartEngine) -> Self {
        Self {
            cards: result
                .products
                .iter()
                .map(|product| ProductCardView::new(product, cart))
                .collect(),
            message: result.results_message(),
            category: result.category.as_str().to_string(),
            query: result.query.clone(),
        }
    }
}

/// One row of the cart panel or order summary.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
    pub thumbnail: String,
    /// Set on a line the last request appended, for the fade-in style.
    pub is_new: bool,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.price.to_string(),
            line_total: line.line_total().to_string(),
            thumbnail: line.thumbnail.clone(),
            is_new: false,
        }
    }
}

/// The cart panel.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub count: u64,
    pub total: String,
}

impl CartView {
    #[must_use]
    pub fn new(cart: &CartEngine) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            count: cart.count(),
            total: cart.total().to_string(),
        }
    }

    /// Mark the line at `index` as just added.
    #[must_use]
    pub fn with_new_line(mut self, index: Option<usize>) -> Self {
        if let Some(line) = index.and_then(|i| self.lines.get_mut(i)) {
            line.is_new = true;
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The confirm control is offered only for a non-empty cart.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        !self.is_empty()
    }
}

/// Order confirmation summary.
#[derive(Debug, Clone)]
pub struct OrderConfirmationView {
    pub lines: Vec<CartLineView>,
    pub total: String,
}

impl OrderConfirmationView {
    /// Summarise the cart for confirmation; `None` when the cart is empty.
    #[must_use]
    pub fn new(cart: &CartEngine) -> Option<Self> {
        if cart.is_empty() {
            return None;
        }
        Some(Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total().to_string(),
        })
    }
}
