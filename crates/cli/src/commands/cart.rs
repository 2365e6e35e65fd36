//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! rs-cart show
//!
//! # Add one unit of product 1
//! rs-cart add 1
//!
//! # Set product 1 to 3 units
//! rs-cart update 1 3
//!
//! # Remove product 1
//! rs-cart remove 1
//! ```
//!
//! Every command runs the fail-soft cart operation, then logs the
//! shopper-facing messages it produced. Any message makes the command fail.

use std::sync::Arc;

use rocketshoes_cart::{CartConfig, CartState, FileStore, RecordingNotifier, StoreApiClient};
use rocketshoes_core::{ProductId, UpdateProductAmount};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The cart or its collaborators could not be set up.
    #[error("Setup failed: {0}")]
    Setup(String),

    /// The cart operation reported errors to the shopper.
    #[error("{}", .0.join("; "))]
    Rejected(Vec<String>),
}

/// A cart opened from configuration, with its notifier.
pub struct CartSession {
    cart: CartState,
    notifier: RecordingNotifier,
}

impl CartSession {
    /// Open the cart described by `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the API client cannot be built or storage cannot be read.
    pub fn open(config: &CartConfig) -> Result<Self, CommandError> {
        let api =
            StoreApiClient::new(&config.api).map_err(|e| CommandError::Setup(e.to_string()))?;
        let store = FileStore::open(&config.storage.path);
        let notifier = RecordingNotifier::new();

        info!(
            api = %config.api.base_url,
            storage = %store.path().display(),
            "Opening cart"
        );

        let cart = CartState::new(
            Arc::new(api),
            Arc::new(store),
            Arc::new(notifier.clone()),
            config.storage.cart_key.as_str(),
        )
        .map_err(|e| CommandError::Setup(e.to_string()))?;

        Ok(Self { cart, notifier })
    }

    /// Turn notifications produced by the last operation into a result.
    fn finish(&self) -> Result<(), CommandError> {
        let errors = self.notifier.errors();
        self.notifier.clear();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CommandError::Rejected(errors))
        }
    }
}

/// Log the cart contents and totals.
pub fn show(session: &CartSession) {
    let items = session.cart.cart();
    if items.is_empty() {
        info!("Cart is empty");
        return;
    }

    for item in &items {
        info!(
            id = %item.id,
            amount = item.amount,
            price = %item.price,
            line_total = %item.line_total(),
            "{}",
            item.title
        );
    }
    info!(
        items = session.cart.item_count(),
        subtotal = %session.cart.subtotal(),
        "Cart total"
    );
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns `CommandError::Rejected` with the shopper-facing messages if the
/// product could not be added.
pub async fn add(session: &CartSession, product_id: ProductId) -> Result<(), CommandError> {
    session.cart.add_product(product_id).await;
    session.finish()?;
    show(session);
    Ok(())
}

/// Remove a product.
///
/// # Errors
///
/// Returns `CommandError::Rejected` if the product is not in the cart or the
/// change could not be saved.
pub async fn remove(session: &CartSession, product_id: ProductId) -> Result<(), CommandError> {
    session.cart.remove_product(product_id).await;
    session.finish()?;
    show(session);
    Ok(())
}

/// Set the amount of a product already in the cart.
///
/// Non-positive amounts are ignored.
///
/// # Errors
///
/// Returns `CommandError::Rejected` if the amount exceeds stock or the
/// change could not be applied.
pub async fn update(
    session: &CartSession,
    product_id: ProductId,
    amount: i32,
) -> Result<(), CommandError> {
    session
        .cart
        .update_product_amount(UpdateProductAmount { product_id, amount })
        .await;
    session.finish()?;
    show(session);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_joins_messages() {
        let err = CommandError::Rejected(vec![
            "Quantidade solicitada fora de estoque".to_string(),
            "Erro na adição do produto".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Quantidade solicitada fora de estoque; Erro na adição do produto"
        );
    }
}
