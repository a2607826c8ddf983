//! Core types for Dessert Cart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::CartLine;
pub use id::*;
pub use price::{Price, PriceError};
pub use product::{Product, ProductImages};
