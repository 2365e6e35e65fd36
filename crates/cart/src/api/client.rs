//! `reqwest` implementation of [`InventoryApi`].
//!
//! Product details are cached using `moka` (5-minute TTL). Stock is never
//! cached: every cart operation must see the current inventory.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use rocketshoes_core::{ProductDetails, ProductId, Stock};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{ApiError, InventoryApi};
use crate::config::ApiConfig;

/// Client for the store API.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the
/// product cache.
#[derive(Clone)]
pub struct StoreApiClient {
    inner: Arc<StoreApiClientInner>,
}

struct StoreApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    products: Cache<ProductId, ProductDetails>,
}

impl StoreApiClient {
    /// Create a new store API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let products = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(StoreApiClientInner {
                client,
                base_url: config.base_url.clone(),
                products,
            }),
        })
    }

    /// Resolve a resource path (`stock/1`) against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                url = %url,
                body = %body.chars().take(500).collect::<String>(),
                "Store API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(
                error = %e,
                url = %url,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse store API response"
            );
            ApiError::Parse(e)
        })
    }
}

#[async_trait]
impl InventoryApi for StoreApiClient {
    #[instrument(skip(self))]
    async fn get_stock(&self, id: ProductId) -> Result<Stock, ApiError> {
        let stock: Stock = self.get_json(&format!("stock/{id}")).await?;
        debug!(amount = stock.amount, "Fetched stock");
        Ok(stock)
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: ProductId) -> Result<ProductDetails, ApiError> {
        if let Some(product) = self.inner.products.get(&id).await {
            debug!("Product cache hit");
            return Ok(product);
        }

        let product: ProductDetails = self.get_json(&format!("products/{id}")).await?;
        self.inner.products.insert(id, product.clone()).await;
        debug!(title = %product.title, "Fetched product");
        Ok(product)
    }
}
