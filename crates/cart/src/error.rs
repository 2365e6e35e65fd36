//! Cart error type and its mapping to user-facing messages.

use rocketshoes_core::ProductId;
use thiserror::Error;

use crate::api::ApiError;
use crate::notify::messages;
use crate::storage::StorageError;

/// Errors produced by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The store cannot cover the requested quantity.
    #[error("Out of stock: product {product_id} requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: i32,
    },

    /// The product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Store API operation failed.
    #[error("Store API error: {0}")]
    Api(#[from] ApiError),

    /// Cart snapshot could not be persisted.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// The cart operation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    /// Generic failure message for this operation.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Add => messages::ADD_FAILED,
            Self::Remove => messages::REMOVE_FAILED,
            Self::UpdateAmount => messages::UPDATE_FAILED,
        }
    }
}

impl CartError {
    /// Whether this is a stock-limit violation rather than a failure.
    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        matches!(self, Self::OutOfStock { .. })
    }

    /// Message shown to the shopper when `operation` fails with this error.
    ///
    /// Stock violations get their own message; everything else gets the
    /// operation's generic failure message.
    #[must_use]
    pub const fn user_message(&self, operation: CartOperation) -> &'static str {
        if self.is_out_of_stock() {
            messages::OUT_OF_STOCK
        } else {
            operation.failure_message()
        }
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
