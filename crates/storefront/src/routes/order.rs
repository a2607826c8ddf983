//! Order confirmation handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::views::{CartView, OrderConfirmationView};

/// Order confirmation modal fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/order_confirmation.html")]
pub struct OrderConfirmationTemplate {
    pub order: OrderConfirmationView,
}

/// Cart panel after a new order, closing the modal out-of-band.
#[derive(Template, WebTemplate)]
#[template(path = "partials/order_started.html")]
pub struct OrderStartedTemplate {
    pub cart: CartView,
}

/// Show the order summary.
///
/// Refused for an empty cart; the confirm control is not offered then.
#[instrument(skip(state))]
pub async fn confirm(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let cart = state.cart()?;
    let order = OrderConfirmationView::new(&cart)
        .ok_or_else(|| AppError::BadRequest("cart is empty".to_string()))?;

    tracing::info!(lines = order.lines.len(), total = %order.total, "Order confirmed");
    Ok(OrderConfirmationTemplate { order })
}

/// Start a new order: empty the cart and its saved copy.
#[instrument(skip(state))]
pub async fn start_new(State(state): State<AppState>) -> Result<Response> {
    let mut cart = state.cart()?;
    cart.clear();

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        OrderStartedTemplate {
            cart: CartView::new(&cart),
        },
    )
        .into_response())
}
