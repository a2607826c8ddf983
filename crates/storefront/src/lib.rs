//! Dessert Cart storefront library.
//!
//! The catalog browser, cart engine, local cart storage and HTTP surface live
//! here as a library so the server binary, the CLI and the integration tests
//! share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod routes;
pub mod state;
pub mod storage;
pub mod views;
