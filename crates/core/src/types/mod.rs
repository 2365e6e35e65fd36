//! Core types for Rocket Shoes.
//!
//! This module provides type-safe wrappers for catalog and cart concepts.

pub mod cart;
pub mod id;
pub mod product;

pub use cart::{UpdateProductAmount, amounts_by_product, item_count, subtotal};
pub use id::*;
pub use product::{Product, ProductDetails, Stock};
