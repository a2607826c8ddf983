//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation answers with the re-rendered cart panel and an
//! `HX-Trigger: cart-updated` header so the product grid and the count
//! badge refresh from the same post-mutation state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use dessert_cart_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use crate::cart::{AddOutcome, CartEngine};
use crate::error::Result;
use crate::state::AppState;
use crate::views::CartView;

// Product IDs arrive signed so that out-of-range values (such as `-1`) reach
// the handlers and are ignored like any other unknown product.

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i64,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i64,
}

/// Cart panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Render the cart panel after a mutation, with the update trigger.
fn updated_panel(cart: &CartEngine, new_line: Option<usize>) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartPanelTemplate {
            cart: CartView::new(cart).with_new_line(new_line),
        },
    )
        .into_response()
}

/// Cart panel fragment.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let cart = state.cart()?;
    Ok(CartPanelTemplate {
        cart: CartView::new(&cart),
    })
}

/// Add one unit of a product (HTMX).
///
/// Unknown product IDs leave the cart unchanged.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Result<Response> {
    let mut cart = state.cart()?;
    let outcome = ProductId::from_signed(form.product_id)
        .map_or(AddOutcome::UnknownProduct, |id| cart.add_item(id));
    let new_line = (outcome == AddOutcome::NewLine).then(|| cart.lines().len() - 1);
    Ok(updated_panel(&cart, new_line))
}

/// Change a line's quantity by a signed delta (HTMX).
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let mut cart = state.cart()?;
    if let Some(id) = ProductId::from_signed(form.product_id) {
        cart.change_quantity(id, form.delta);
    }
    Ok(updated_panel(&cart, None))
}

/// Remove a line (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let mut cart = state.cart()?;
    if let Some(id) = ProductId::from_signed(form.product_id) {
        cart.remove_item(id);
    }
    Ok(updated_panel(&cart, None))
}

/// Cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let cart = state.cart()?;
    Ok(CartCountTemplate {
        count: cart.count(),
    })
}
