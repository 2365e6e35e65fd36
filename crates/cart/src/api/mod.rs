//! Store API access: stock and product lookups.
//!
//! # Endpoints
//!
//! - `GET {base}/stock/{id}` -> `{ "id": 1, "amount": 3 }`
//! - `GET {base}/products/{id}` -> `{ "id": 1, "title": "...", "price": 179.9, "image": "..." }`
//!
//! The cart talks to the API through the [`InventoryApi`] trait so the
//! state container can be exercised without a network.

mod client;

pub use client::StoreApiClient;

use async_trait::async_trait;
use rocketshoes_core::{ProductDetails, ProductId, Stock};
use thiserror::Error;

/// Errors that can occur when talking to the store API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Read access to inventory and catalog data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Fetch the available stock for a product.
    async fn get_stock(&self, id: ProductId) -> Result<Stock, ApiError>;

    /// Fetch the catalog details for a product.
    async fn get_product(&self, id: ProductId) -> Result<ProductDetails, ApiError>;
}
