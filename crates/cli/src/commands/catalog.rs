//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! dessert-cli catalog categories
//! dessert-cli catalog list --category Cake --query red --width 375
//! ```

use std::fmt::Write as _;

use dessert_cart_storefront::filter::{CategoryFilter, FilterResult, compute_categories, filter};
use dessert_cart_storefront::views::Viewport;

use super::{CliError, Context};

/// Print the category filter labels, `All` first.
#[allow(clippy::print_stdout)]
pub fn categories(context: &Context) -> Result<(), CliError> {
    for category in compute_categories(context.catalog()?) {
        println!("{category}");
    }
    Ok(())
}

/// Print the products that pass the category and search filters.
#[allow(clippy::print_stdout)]
pub fn list(
    context: &Context,
    category: &str,
    query: &str,
    width: Option<u32>,
) -> Result<(), CliError> {
    let catalog = context.catalog()?;
    let result = filter(catalog, &CategoryFilter::parse(category), query);
    print!("{}", render(&result, width.map(Viewport::for_width)));
    Ok(())
}

/// Format a filter result, one product per line.
fn render(result: &FilterResult<'_>, viewport: Option<Viewport>) -> String {
    let mut out = String::new();
    if let Some(message) = result.results_message() {
        let _ = writeln!(out, "{message}");
    }
    for product in &result.products {
        let _ = write!(
            out,
            "{:>3}  {:<28} {:<14} {}",
            product.id.as_u32(),
            product.name,
            product.category,
            product.price
        );
        if let Some(viewport) = viewport {
            let _ = write!(out, "  {}", viewport.image(&product.images));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use dessert_cart_storefront::catalog::Catalog;

    const CATALOG: &str = r#"[
        {
            "image": {
                "thumbnail": "t-waffle.jpg",
                "mobile": "m-waffle.jpg",
                "tablet": "t-waffle.jpg",
                "desktop": "d-waffle.jpg"
            },
            "name": "Waffle with Berries",
            "category": "Waffle",
            "price": 6.5
        },
        {
            "image": {
                "thumbnail": "t-cake.jpg",
                "mobile": "m-cake.jpg",
                "tablet": "t-cake.jpg",
                "desktop": "d-cake.jpg"
            },
            "name": "Red Velvet Cake",
            "category": "Cake",
            "price": 4.5
        }
    ]"#;

    #[test]
    fn test_render_unfiltered_lists_every_product() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let result = filter(&catalog, &CategoryFilter::All, "");
        let out = render(&result, None);

        assert_eq!(out.lines().count(), 2);
        assert!(out.contains("Waffle with Berries"));
        assert!(out.contains("$4.50"));
    }

    #[test]
    fn test_render_filtered_starts_with_message() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let result = filter(&catalog, &CategoryFilter::parse("Cake"), "");
        let out = render(&result, None);

        assert_eq!(
            out.lines().next(),
            Some("Showing 1 dessert in Cake category")
        );
        assert!(!out.contains("Waffle"));
    }

    #[test]
    fn test_render_picks_viewport_image() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let result = filter(&catalog, &CategoryFilter::All, "velvet");
        let out = render(&result, Some(Viewport::for_width(375)));

        assert!(out.contains("m-cake.jpg"));
    }

    #[test]
    fn test_render_no_results_message() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let result = filter(&catalog, &CategoryFilter::All, "pie");
        let out = render(&result, None);

        assert_eq!(out, "No desserts found for \"pie\"\n");
    }
}
