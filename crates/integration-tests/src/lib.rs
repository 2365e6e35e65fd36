//! Integration test support for the Rocket Shoes cart.
//!
//! Starts an in-process store API (`GET /stock/{id}`, `GET /products/{id}`)
//! on an ephemeral port so tests can drive the real HTTP client, file
//! storage, and cart state together.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocketshoes-integration-tests
//! ```

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use rocketshoes_cart::ApiConfig;
use rocketshoes_core::{ProductDetails, ProductId, Stock};
use rust_decimal::Decimal;
use url::Url;

/// Shared state of the mock store API.
#[derive(Default)]
struct Inventory {
    stock: Mutex<HashMap<i32, i32>>,
    products: Mutex<HashMap<i32, ProductDetails>>,
    failing: Mutex<bool>,
    malformed: Mutex<HashSet<i32>>,
    stock_requests: AtomicUsize,
    product_requests: AtomicUsize,
}

/// Body served in place of JSON for products marked malformed.
const MALFORMED_BODY: &str = "<html>upstream error</html>";

/// Handle to a running mock store API.
pub struct MockStoreApi {
    addr: SocketAddr,
    inventory: Arc<Inventory>,
}

impl MockStoreApi {
    /// Start the server on `127.0.0.1` with an OS-assigned port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    #[allow(clippy::expect_used)]
    pub async fn start() -> Self {
        let inventory = Arc::new(Inventory::default());

        let app = Router::new()
            .route("/stock/{id}", get(get_stock))
            .route("/products/{id}", get(get_product))
            .with_state(Arc::clone(&inventory));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock store API");
        let addr = listener
            .local_addr()
            .expect("Failed to read mock store API address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, inventory }
    }

    /// Client configuration pointing at this server.
    ///
    /// # Panics
    ///
    /// Panics if the server address does not form a valid URL.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        let url = Url::parse(&format!("http://{}/", self.addr)).expect("Invalid mock URL");
        ApiConfig::new(url)
    }

    /// Register a product with `amount` units in stock.
    pub fn add_product(&self, id: i32, title: &str, price_cents: i64, amount: i32) {
        let details = ProductDetails {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Decimal::new(price_cents, 2),
            image: format!("https://cdn.rocketshoes.example/{id}.jpg"),
            extra: serde_json::Map::new(),
        };
        lock(&self.inventory.products).insert(id, details);
        self.set_stock(id, amount);
    }

    /// Change the stock of a product.
    pub fn set_stock(&self, id: i32, amount: i32) {
        lock(&self.inventory.stock).insert(id, amount);
    }

    /// Make every request fail with 500 until reset.
    pub fn set_failing(&self, failing: bool) {
        *lock(&self.inventory.failing) = failing;
    }

    /// Answer `200 OK` with a body that is not JSON for both routes of `id`.
    pub fn set_malformed(&self, id: i32) {
        lock(&self.inventory.malformed).insert(id);
    }

    /// Number of `GET /stock/{id}` requests served.
    #[must_use]
    pub fn stock_requests(&self) -> usize {
        self.inventory.stock_requests.load(Ordering::SeqCst)
    }

    /// Number of `GET /products/{id}` requests served.
    #[must_use]
    pub fn product_requests(&self) -> usize {
        self.inventory.product_requests.load(Ordering::SeqCst)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Response forced by `set_failing` or `set_malformed`, if any.
fn injected_response(inventory: &Inventory, id: i32) -> Option<Response> {
    if *lock(&inventory.failing) {
        return Some(StatusCode::INTERNAL_SERVER_ERROR.into_response());
    }
    lock(&inventory.malformed)
        .contains(&id)
        .then(|| MALFORMED_BODY.into_response())
}

async fn get_stock(State(inventory): State<Arc<Inventory>>, Path(id): Path<i32>) -> Response {
    inventory.stock_requests.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = injected_response(&inventory, id) {
        return response;
    }

    let amount = lock(&inventory.stock).get(&id).copied();
    amount.map_or_else(
        || StatusCode::NOT_FOUND.into_response(),
        |amount| {
            Json(Stock {
                id: ProductId::new(id),
                amount,
            })
            .into_response()
        },
    )
}

async fn get_product(State(inventory): State<Arc<Inventory>>, Path(id): Path<i32>) -> Response {
    inventory.product_requests.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = injected_response(&inventory, id) {
        return response;
    }

    let product = lock(&inventory.products).get(&id).cloned();
    product.map_or_else(
        || StatusCode::NOT_FOUND.into_response(),
        |product| Json(product).into_response(),
    )
}
