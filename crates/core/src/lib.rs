//! Rocket Shoes Core - Shared types library.
//!
//! This crate provides the types shared by the Rocket Shoes components:
//! - `cart` - Cart state container, inventory client, and local storage
//! - `cli` - Command-line front-end for driving a cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP
//! clients, no storage. This keeps it usable from any front-end.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, products, stock, and cart totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
