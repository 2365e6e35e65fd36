//! Cart state container.
//!
//! [`CartState`] owns the in-memory cart, validates quantity changes
//! against the store's stock, and writes a snapshot to local storage after
//! every successful change.
//!
//! Each operation comes in two flavours:
//! - `add_product`, `remove_product`, `update_product_amount` are fail-soft:
//!   errors go to the [`Notifier`] and the caller just sees the new state.
//! - `try_*` return the outcome for callers that need it.
//!
//! Changes are computed on a copy of the list, persisted, and only then
//! installed, so a failed operation leaves both memory and the snapshot as
//! they were.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use rocketshoes_core::{Product, ProductId, UpdateProductAmount};
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::api::InventoryApi;
use crate::error::{CartError, CartOperation, Result};
use crate::notify::Notifier;
use crate::storage::{KeyValueStore, StorageError, load_cart, save_cart};

/// What a successful operation did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartUpdate {
    /// Product was added with amount 1.
    Added,
    /// Product already in the cart; amount is now `amount`.
    Incremented { amount: u32 },
    /// Product was removed.
    Removed,
    /// Amount was set to `amount`.
    AmountSet { amount: u32 },
    /// Nothing changed (non-positive amount, or an amount update for a
    /// product that is not in the cart).
    Ignored,
}

/// Shared cart state.
///
/// Cheaply cloneable via `Arc`; clones operate on the same cart.
#[derive(Clone)]
pub struct CartState {
    inner: Arc<CartStateInner>,
}

struct CartStateInner {
    api: Arc<dyn InventoryApi>,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    key: String,
    cart: RwLock<Vec<Product>>,
    /// Serializes operations so the stock check and the commit of one
    /// operation cannot interleave with another.
    operations: Mutex<()>,
}

impl CartState {
    /// Create a cart, re-hydrating it from the snapshot under `key`.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read.
    pub fn new(
        api: Arc<dyn InventoryApi>,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        key: impl Into<String>,
    ) -> std::result::Result<Self, StorageError> {
        let key = key.into();
        let cart = load_cart(store.as_ref(), &key)?;
        debug!(key = %key, items = cart.len(), "Cart loaded");

        Ok(Self {
            inner: Arc::new(CartStateInner {
                api,
                store,
                notifier,
                key,
                cart: RwLock::new(cart),
                operations: Mutex::new(()),
            }),
        })
    }

    /// Snapshot of the current cart.
    #[must_use]
    pub fn cart(&self) -> Vec<Product> {
        self.inner
            .cart
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        rocketshoes_core::item_count(&self.cart())
    }

    /// Sum of `price * amount` over the cart.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        rocketshoes_core::subtotal(&self.cart())
    }

    /// Units in the cart keyed by product.
    #[must_use]
    pub fn amounts_by_product(&self) -> HashMap<ProductId, u32> {
        rocketshoes_core::amounts_by_product(&self.cart())
    }

    // =========================================================================
    // Fail-soft operations
    // =========================================================================

    /// Add one unit of a product, reporting any failure to the notifier.
    pub async fn add_product(&self, product_id: ProductId) {
        if let Err(e) = self.try_add_product(product_id).await {
            self.report(&e, CartOperation::Add);
        }
    }

    /// Remove a product, reporting any failure to the notifier.
    pub async fn remove_product(&self, product_id: ProductId) {
        if let Err(e) = self.try_remove_product(product_id).await {
            self.report(&e, CartOperation::Remove);
        }
    }

    /// Set a product's amount, reporting any failure to the notifier.
    pub async fn update_product_amount(&self, request: UpdateProductAmount) {
        if let Err(e) = self.try_update_product_amount(request).await {
            self.report(&e, CartOperation::UpdateAmount);
        }
    }

    // =========================================================================
    // Operations returning their outcome
    // =========================================================================

    /// Add one unit of a product.
    ///
    /// A product not yet in the cart needs at least one unit in stock and is
    /// appended with amount 1; a product already in the cart needs more
    /// stock than its current amount and is incremented.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutOfStock` if the stock cannot cover the new
    /// amount, or an API/storage error. The cart is unchanged on error.
    #[instrument(skip(self))]
    pub async fn try_add_product(&self, product_id: ProductId) -> Result<CartUpdate> {
        let _guard = self.inner.operations.lock().await;

        let stock = self.inner.api.get_stock(product_id).await?;
        let mut next = self.cart();

        let update = if let Some(item) = next.iter_mut().find(|item| item.id == product_id) {
            let requested = item.amount.saturating_add(1);
            if !stock.covers(requested) {
                return Err(CartError::OutOfStock {
                    product_id,
                    requested,
                    available: stock.amount,
                });
            }
            item.amount = requested;
            CartUpdate::Incremented { amount: requested }
        } else {
            if !stock.covers(1) {
                return Err(CartError::OutOfStock {
                    product_id,
                    requested: 1,
                    available: stock.amount,
                });
            }
            let details = self.inner.api.get_product(product_id).await?;
            next.push(details.into_cart_item(1));
            CartUpdate::Added
        };

        self.commit(next)?;
        info!(?update, "Product added to cart");
        Ok(update)
    }

    /// Remove a product from the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if the product is absent, or a storage
    /// error. The cart is unchanged on error.
    #[instrument(skip(self))]
    pub async fn try_remove_product(&self, product_id: ProductId) -> Result<CartUpdate> {
        let _guard = self.inner.operations.lock().await;

        let mut next = self.cart();
        let before = next.len();
        next.retain(|item| item.id != product_id);
        if next.len() == before {
            return Err(CartError::NotInCart(product_id));
        }

        self.commit(next)?;
        info!("Product removed from cart");
        Ok(CartUpdate::Removed)
    }

    /// Set the amount of a product in the cart.
    ///
    /// Non-positive amounts are ignored without contacting the store. The
    /// requested amount is always checked against stock; a product that is
    /// not in the cart is then left alone.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutOfStock` if the stock cannot cover `amount`, or
    /// an API/storage error. The cart is unchanged on error.
    #[instrument(skip(self))]
    pub async fn try_update_product_amount(
        &self,
        request: UpdateProductAmount,
    ) -> Result<CartUpdate> {
        let Ok(requested) = u32::try_from(request.amount) else {
            return Ok(CartUpdate::Ignored);
        };
        if requested == 0 {
            return Ok(CartUpdate::Ignored);
        }

        let _guard = self.inner.operations.lock().await;
        let product_id = request.product_id;

        let stock = self.inner.api.get_stock(product_id).await?;
        if !stock.covers(requested) {
            return Err(CartError::OutOfStock {
                product_id,
                requested,
                available: stock.amount,
            });
        }

        let mut next = self.cart();
        let Some(item) = next.iter_mut().find(|item| item.id == product_id) else {
            debug!("Product not in cart, nothing to update");
            return Ok(CartUpdate::Ignored);
        };
        item.amount = requested;

        self.commit(next)?;
        info!(amount = requested, "Product amount updated");
        Ok(CartUpdate::AmountSet { amount: requested })
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Persist `next` and make it the current cart.
    fn commit(&self, next: Vec<Product>) -> Result<()> {
        save_cart(self.inner.store.as_ref(), &self.inner.key, &next)?;
        *self
            .inner
            .cart
            .write()
            .unwrap_or_else(PoisonError::into_inner) = next;
        Ok(())
    }

    /// Send the user-facing message for `error` to the notifier.
    fn report(&self, error: &CartError, operation: CartOperation) {
        if error.is_out_of_stock() {
            tracing::info!(error = %error, ?operation, "Cart operation rejected");
        } else {
            tracing::warn!(error = %error, ?operation, "Cart operation failed");
        }
        self.inner.notifier.error(error.user_message(operation));
    }
}
