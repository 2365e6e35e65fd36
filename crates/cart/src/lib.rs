//! Rocket Shoes cart library.
//!
//! Client-side shopping cart: add, remove, and re-quantify products with
//! stock validation against the store API, persisting a snapshot to local
//! key-value storage after every change.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use rocketshoes_cart::{CartConfig, CartState, FileStore, RecordingNotifier, StoreApiClient};
//!
//! let config = CartConfig::from_env()?;
//! let api = StoreApiClient::new(&config.api)?;
//! let store = FileStore::open(&config.storage.path);
//!
//! let cart = CartState::new(
//!     Arc::new(api),
//!     Arc::new(store),
//!     Arc::new(RecordingNotifier::new()),
//!     &config.storage.cart_key,
//! )?;
//!
//! cart.add_product(ProductId::new(1)).await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod state;
pub mod storage;

pub use api::{ApiError, InventoryApi, StoreApiClient};
pub use config::{ApiConfig, CartConfig, ConfigError, StorageConfig};
pub use error::{CartError, CartOperation};
pub use notify::{Notifier, RecordingNotifier};
pub use state::{CartState, CartUpdate};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
