//! Dessert Cart CLI - browse the catalog and manage the saved cart.
//!
//! # Usage
//!
//! ```bash
//! # List categories, then products in one of them
//! dessert-cli catalog categories
//! dessert-cli catalog list --category Cake
//!
//! # Search by name or category
//! dessert-cli catalog list --query brulee
//!
//! # Edit the cart
//! dessert-cli cart add 3
//! dessert-cli cart dec 3
//! dessert-cli cart show
//!
//! # Print the order summary and start a new order
//! dessert-cli order confirm
//! ```
//!
//! The cart is read from and written to the same store as the storefront
//! server (`DESSERT_STORE_PATH`, `DESSERT_CART_KEY`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use dessert_cart_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "dessert-cli")]
#[command(author, version, about = "Dessert catalog and cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Inspect and edit the saved cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Confirm the current order
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List category filter labels
    Categories,
    /// List products, optionally filtered
    List {
        /// Category to show (`All` for every category)
        #[arg(short, long, default_value = "All")]
        category: String,

        /// Case-insensitive search over name and category
        #[arg(short, long, default_value = "")]
        query: String,

        /// Viewport width used to pick the product image
        #[arg(short, long)]
        width: Option<u32>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and the order total
    Show,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Increase a line's quantity by one
    Inc { product_id: ProductId },
    /// Decrease a line's quantity by one, removing it at zero
    Dec { product_id: ProductId },
    /// Remove a line
    Remove { product_id: ProductId },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrderAction {
    /// Print the order summary and start a new, empty order
    Confirm,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), commands::CliError> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let context = commands::Context::from_env().await?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Categories => commands::catalog::categories(&context)?,
            CatalogAction::List {
                category,
                query,
                width,
            } => commands::catalog::list(&context, &category, &query, width)?,
        },
        Commands::Cart { action } => {
            let mut engine = context.engine();
            match action {
                CartAction::Show => commands::cart::show(&engine),
                CartAction::Add { product_id } => commands::cart::add(&mut engine, product_id)?,
                CartAction::Inc { product_id } => {
                    commands::cart::change(&mut engine, product_id, 1)?;
                }
                CartAction::Dec { product_id } => {
                    commands::cart::change(&mut engine, product_id, -1)?;
                }
                CartAction::Remove { product_id } => {
                    commands::cart::remove(&mut engine, product_id)?;
                }
                CartAction::Clear => commands::cart::clear(&mut engine),
            }
        }
        Commands::Order { action } => match action {
            OrderAction::Confirm => commands::order::confirm(&mut context.engine())?,
        },
    }
    Ok(())
}
