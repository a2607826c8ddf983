//! Cart editing commands.
//!
//! Each command restores the saved cart, applies one operation, and the
//! engine writes the result back before the process exits.

use std::fmt::Write as _;

use dessert_cart_core::ProductId;
use dessert_cart_storefront::cart::{AddOutcome, CartEngine};
use dessert_cart_storefront::views::CartView;

use super::CliError;

/// Print the cart.
#[allow(clippy::print_stdout)]
pub fn show(engine: &CartEngine) {
    print!("{}", render(&CartView::new(engine)));
}

/// Add one unit of a product and print the cart.
pub fn add(engine: &mut CartEngine, product_id: ProductId) -> Result<(), CliError> {
    if engine.add_item(product_id) == AddOutcome::UnknownProduct {
        return Err(CliError::UnknownProduct(product_id));
    }
    show(engine);
    Ok(())
}

/// Change a line's quantity by `delta` and print the cart.
pub fn change(engine: &mut CartEngine, product_id: ProductId, delta: i64) -> Result<(), CliError> {
    if !engine.change_quantity(product_id, delta) {
        return Err(CliError::NotInCart(product_id));
    }
    show(engine);
    Ok(())
}

/// Remove a line and print the cart.
pub fn remove(engine: &mut CartEngine, product_id: ProductId) -> Result<(), CliError> {
    if !engine.remove_item(product_id) {
        return Err(CliError::NotInCart(product_id));
    }
    show(engine);
    Ok(())
}

/// Empty the cart.
pub fn clear(engine: &mut CartEngine) {
    engine.clear();
    show(engine);
}

/// Format the cart panel as text.
fn render(cart: &CartView) -> String {
    let mut out = format!("Your Cart ({})\n", cart.count);
    if cart.is_empty() {
        out.push_str("Your cart is empty\n");
        return out;
    }
    for line in &cart.lines {
        let _ = writeln!(
            out,
            "{:>3}  {:<28} {}x @ {}  {}",
            line.product_id.as_u32(),
            line.name,
            line.quantity,
            line.unit_price,
            line.line_total
        );
    }
    let _ = writeln!(out, "Order Total: {}", cart.total);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use std::sync::Arc;

    use super::*;
    use dessert_cart_storefront::catalog::Catalog;
    use dessert_cart_storefront::storage::{CartStorage, MemoryStore};

    pub(crate) fn engine() -> CartEngine {
        let catalog = Catalog::from_json(
            r#"[
                {
                    "image": {
                        "thumbnail": "waffle.jpg",
                        "mobile": "waffle.jpg",
                        "tablet": "waffle.jpg",
                        "desktop": "waffle.jpg"
                    },
                    "name": "Waffle",
                    "category": "Waffle",
                    "price": 6.50
                },
                {
                    "image": {
                        "thumbnail": "brulee.jpg",
                        "mobile": "brulee.jpg",
                        "tablet": "brulee.jpg",
                        "desktop": "brulee.jpg"
                    },
                    "name": "Crème Brûlée",
                    "category": "Crème Brûlée",
                    "price": 7.00
                }
            ]"#,
        )
        .unwrap();
        let storage = CartStorage::new(Arc::new(MemoryStore::new()), CartStorage::DEFAULT_KEY);
        CartEngine::new(Arc::new(catalog), storage)
    }

    #[test]
    fn test_render_empty_cart() {
        let engine = engine();
        assert_eq!(
            render(&CartView::new(&engine)),
            "Your Cart (0)\nYour cart is empty\n"
        );
    }

    #[test]
    fn test_render_lines_and_total() {
        let mut engine = engine();
        engine.add_item(ProductId::new(0));
        engine.add_item(ProductId::new(0));
        engine.add_item(ProductId::new(1));

        let out = render(&CartView::new(&engine));
        assert!(out.starts_with("Your Cart (3)\n"));
        assert!(out.contains("2x @ $6.50  $13.00"));
        assert!(out.contains("1x @ $7.00  $7.00"));
        assert!(out.ends_with("Order Total: $20.00\n"));
    }

    #[test]
    fn test_add_unknown_product_is_an_error() {
        let mut engine = engine();
        let err = add(&mut engine, ProductId::new(9)).unwrap_err();
        assert!(matches!(err, CliError::UnknownProduct(id) if id == ProductId::new(9)));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_change_absent_line_is_an_error() {
        let mut engine = engine();
        assert!(matches!(
            change(&mut engine, ProductId::new(0), 1),
            Err(CliError::NotInCart(_))
        ));
        assert!(matches!(
            remove(&mut engine, ProductId::new(0)),
            Err(CliError::NotInCart(_))
        ));
    }

    #[test]
    fn test_dec_to_zero_removes_line() {
        let mut engine = engine();
        add(&mut engine, ProductId::new(1)).unwrap();
        change(&mut engine, ProductId::new(1), -1).unwrap();
        assert!(engine.is_empty());
    }
}
