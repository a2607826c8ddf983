//! Dessert Cart Core - Shared types library.
//!
//! This crate provides the domain types used across all Dessert Cart components:
//! - `storefront` - Catalog, cart engine, persistence and the local web UI
//! - `cli` - Command-line front end driving the same cart engine
//!
//! # Architecture
//!
//! The core crate contains only types and pure arithmetic - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices, plus the
//!   `Product` and `CartLine` records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
