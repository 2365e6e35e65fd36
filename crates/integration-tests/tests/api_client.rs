//! Error mapping of the real `StoreApiClient` against the in-process store API.

#![allow(clippy::unwrap_used)]

use rocketshoes_cart::{ApiError, InventoryApi, StoreApiClient};
use rocketshoes_core::ProductId;
use rocketshoes_integration_tests::MockStoreApi;

async fn setup() -> (MockStoreApi, StoreApiClient) {
    let server = MockStoreApi::start().await;
    server.add_product(1, "Tênis de Caminhada Leve Confortável", 17990, 3);
    let client = StoreApiClient::new(&server.api_config()).unwrap();
    (server, client)
}

#[tokio::test]
async fn test_fetches_stock_and_product() {
    let (_server, client) = setup().await;

    let stock = client.get_stock(ProductId::new(1)).await.unwrap();
    assert_eq!(stock.id, ProductId::new(1));
    assert_eq!(stock.amount, 3);

    let product = client.get_product(ProductId::new(1)).await.unwrap();
    assert_eq!(product.title, "Tênis de Caminhada Leve Confortável");
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let (_server, client) = setup().await;

    let err = client.get_stock(ProductId::new(42)).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(ref path) if path == "stock/42"));

    let err = client.get_product(ProductId::new(42)).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(ref path) if path == "products/42"));
}

#[tokio::test]
async fn test_server_error_is_status() {
    let (server, client) = setup().await;
    server.set_failing(true);

    let err = client.get_stock(ProductId::new(1)).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));

    let err = client.get_product(ProductId::new(1)).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let (server, client) = setup().await;
    server.set_malformed(1);

    let err = client.get_stock(ProductId::new(1)).await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));

    let err = client.get_product(ProductId::new(1)).await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_failed_product_fetch_is_not_cached() {
    let (server, client) = setup().await;
    server.set_failing(true);
    assert!(client.get_product(ProductId::new(1)).await.is_err());

    server.set_failing(false);
    let product = client.get_product(ProductId::new(1)).await.unwrap();
    assert_eq!(product.id, ProductId::new(1));
    assert_eq!(server.product_requests(), 2);
}
