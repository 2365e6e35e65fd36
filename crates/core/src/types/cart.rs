//! Cart request types and totals.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// Request to set the quantity of a product already in the cart.
///
/// `amount` is signed because it usually comes straight from a quantity
/// input; non-positive values are ignored by the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i32,
}

/// Total number of units across all lines.
#[must_use]
pub fn item_count(cart: &[Product]) -> u32 {
    cart.iter()
        .fold(0_u32, |total, item| total.saturating_add(item.amount))
}

/// Sum of `price * amount` over all lines.
#[must_use]
pub fn subtotal(cart: &[Product]) -> Decimal {
    cart.iter().map(Product::line_total).sum()
}

/// Units in the cart keyed by product, for "n in cart" badges on listings.
#[must_use]
pub fn amounts_by_product(cart: &[Product]) -> HashMap<ProductId, u32> {
    cart.iter().map(|item| (item.id, item.amount)).collect()
}
