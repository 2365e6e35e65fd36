//! Catalog and cart item types.
//!
//! [`ProductDetails`] is what the catalog returns for a product,
//! [`Product`] is a cart line (details plus the quantity in the cart), and
//! [`Stock`] is the inventory's view of how many units are available.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;

/// Product fields as returned by the catalog (`GET /products/{id}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub id: ProductId,
    pub title: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Image URL.
    pub image: String,
    /// Any other fields the catalog returns, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductDetails {
    /// Turn catalog details into a cart line holding `amount` units.
    #[must_use]
    pub fn into_cart_item(self, amount: u32) -> Product {
        Product {
            id: self.id,
            title: self.title,
            price: self.price,
            image: self.image,
            amount,
            extra: self.extra,
        }
    }
}

/// A product held in the cart.
///
/// This is also the shape of each element in the persisted cart snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub image: String,
    /// Units of this product currently in the cart (always >= 1).
    pub amount: u32,
    /// Catalog fields carried over from [`ProductDetails::extra`].
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Price of this line (`price * amount`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.amount)
    }
}

/// Available inventory for a product (`GET /stock/{id}`).
///
/// Read-only and authoritative on the server side; never cached or
/// persisted by the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: i32,
}

impl Stock {
    /// Whether `requested` units can be held in a cart.
    #[must_use]
    pub fn covers(&self, requested: u32) -> bool {
        i64::from(self.amount) >= i64::from(requested)
    }
}
