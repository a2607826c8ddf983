//! Page and product grid handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::cart::CartEngine;
use crate::error::Result;
use crate::filter::{CategoryFilter, filter};
use crate::state::AppState;
use crate::views::{
    CATALOG_ERROR_MESSAGE, CartView, CategoryButtonView, ProductGridView, category_buttons,
};

/// Browse query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub q: String,
}

/// Full page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub categories: Vec<CategoryButtonView>,
    pub grid: Option<ProductGridView>,
    pub cart: CartView,
    /// Item count for the header badge.
    pub count: u64,
    pub query: String,
    pub catalog_error: &'static str,
    pub oob: bool,
}

/// Product grid fragment template (for HTMX).
///
/// Also refreshes the category buttons out-of-band so the active filter
/// stays highlighted.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub categories: Vec<CategoryButtonView>,
    pub grid: Option<ProductGridView>,
    pub catalog_error: &'static str,
    pub oob: bool,
}

/// Filter the catalog and build the grid view.
///
/// Returns no grid when the catalog failed to load.
fn browse(
    state: &AppState,
    cart: &CartEngine,
    query: &BrowseQuery,
) -> (Vec<CategoryButtonView>, Option<ProductGridView>) {
    let category = CategoryFilter::parse(&query.category);
    let buttons = category_buttons(state.categories(), &category);
    let grid = state.catalog().map(|catalog| {
        let result = filter(catalog, &category, &query.q);
        ProductGridView::new(&result, cart)
    });
    (buttons, grid)
}

/// Display the full page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<impl IntoResponse> {
    let cart = state.cart()?;
    let (categories, grid) = browse(&state, &cart, &query);

    Ok(IndexTemplate {
        categories,
        grid,
        cart: CartView::new(&cart),
        count: cart.count(),
        query: query.q.trim().to_string(),
        catalog_error: CATALOG_ERROR_MESSAGE,
        oob: false,
    })
}

/// Product grid fragment (HTMX).
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<impl IntoResponse> {
    let cart = state.cart()?;
    let (categories, grid) = browse(&state, &cart, &query);

    Ok(ProductGridTemplate {
        categories,
        grid,
        catalog_error: CATALOG_ERROR_MESSAGE,
        oob: true,
    })
}
