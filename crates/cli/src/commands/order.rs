//! Order confirmation command.

use std::fmt::Write as _;

use dessert_cart_storefront::cart::CartEngine;
use dessert_cart_storefront::views::OrderConfirmationView;

use super::CliError;

/// Print the order summary, then clear the cart for a new order.
#[allow(clippy::print_stdout)]
pub fn confirm(engine: &mut CartEngine) -> Result<(), CliError> {
    let order = OrderConfirmationView::new(engine).ok_or(CliError::EmptyCart)?;
    print!("{}", render(&order));

    engine.clear();
    tracing::info!("Started a new order");
    Ok(())
}

fn render(order: &OrderConfirmationView) -> String {
    let mut out = String::from("Order Confirmed\nWe hope you enjoy your food!\n\n");
    for line in &order.lines {
        let _ = writeln!(
            out,
            "{}  {}x @ {}  {}",
            line.name, line.quantity, line.unit_price, line.line_total
        );
    }
    let _ = write!(out, "\nOrder Total: {}\n", order.total);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::cart::tests::engine;
    use dessert_cart_core::ProductId;

    #[test]
    fn test_confirm_empty_cart_is_refused() {
        let mut engine = engine();
        assert!(matches!(confirm(&mut engine), Err(CliError::EmptyCart)));
    }

    #[test]
    fn test_confirm_clears_cart() {
        let mut engine = engine();
        engine.add_item(ProductId::new(1));
        confirm(&mut engine).unwrap();
        assert!(engine.is_empty());
        assert_eq!(engine.count(), 0);
    }

    #[test]
    fn test_render_summary() {
        let mut engine = engine();
        engine.add_item(ProductId::new(0));
        engine.add_item(ProductId::new(0));

        let order = OrderConfirmationView::new(&engine).unwrap();
        let out = render(&order);
        assert!(out.contains("Waffle  2x @ $6.50  $13.00\n"));
        assert!(out.ends_with("Order Total: $13.00\n"));
    }
}
