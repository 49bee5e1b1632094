#![allow(clippy::unwrap_used)]
// End-to-end tests for `DataService` against a wiremock backend.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use luna_core::{
    BackendConfig, CoreError, DataService, FallbackReason, OrderStatus, StockStatus, fixtures,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DataService) {
    let server = MockServer::start().await;
    let config = BackendConfig::new(server.uri(), SecretString::from("anon-key".to_owned()))
        .with_timeout(Duration::from_secs(5));
    let service = DataService::connect(Some(&config)).with_fallback_delay(Duration::ZERO);
    (server, service)
}

// ── Remote path ─────────────────────────────────────────────────────

#[tokio::test]
async fn remote_orders_are_decoded() {
    let (server, service) = setup().await;
    assert!(service.is_configured());

    Mock::given(method("GET"))
        .and(path("/rest/v1/orders"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "#R-1", "customerName": "Remote One", "status": "Pending",
              "amount": 19.99, "items": 2, "date": "2024-02-10" },
            { "id": "#R-2", "customerName": "Remote Two", "status": "Shipped",
              "amount": "$5.00", "items": 1, "date": "2024-02-11" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = service.fetch_orders_outcome().await;
    assert!(outcome.is_remote());

    let orders = outcome.into_rows();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].amount.to_string(), "$19.99");
    assert_eq!(orders[1].amount.to_string(), "$5.00");
    assert_eq!(orders[1].status, OrderStatus::Shipped);
}

#[tokio::test]
async fn remote_products_are_decoded() {
    let (server, service) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "SKU-1", "name": "Lamp", "category": "Home",
              "price": "$20.00", "stock": 3, "status": "Low Stock" }
        ])))
        .mount(&server)
        .await;

    let products = service.fetch_products().await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].status, StockStatus::LowStock);
}

#[tokio::test]
async fn empty_remote_table_is_not_a_fallback() {
    let (server, service) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let outcome = service.fetch_customers_outcome().await;
    assert!(outcome.is_remote());
    assert!(outcome.rows().is_empty());
}

// ── Fallback paths ──────────────────────────────────────────────────

#[tokio::test]
async fn server_error_falls_back() {
    let (server, service) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": "XX000", "message": "internal error"
        })))
        .mount(&server)
        .await;

    let outcome = service.fetch_orders_outcome().await;
    match outcome.fallback_reason() {
        Some(FallbackReason::RemoteError(CoreError::Api { status, code, .. })) => {
            assert_eq!(*status, Some(500));
            assert_eq!(code.as_deref(), Some("XX000"));
        }
        other => panic!("expected remote error, got {other:?}"),
    }
    assert_eq!(outcome.into_rows(), fixtures::orders());
}

#[tokio::test]
async fn rejected_key_falls_back() {
    let (server, service) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/customers"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let outcome = service.fetch_customers_outcome().await;
    assert!(matches!(
        outcome.fallback_reason(),
        Some(FallbackReason::RemoteError(CoreError::AuthenticationFailed { .. }))
    ));
    assert_eq!(outcome.into_rows(), fixtures::customers());
}

#[tokio::test]
async fn unknown_status_is_schema_mismatch() {
    let (server, service) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "#R-1", "customerName": "A", "status": "Pending",
              "amount": 1, "items": 1, "date": "2024-02-10" },
            { "id": "#R-2", "customerName": "B", "status": "Refunded",
              "amount": 1, "items": 1, "date": "2024-02-10" }
        ])))
        .mount(&server)
        .await;

    let outcome = service.fetch_orders_outcome().await;
    match outcome.fallback_reason() {
        Some(FallbackReason::SchemaMismatch(CoreError::Decode { index, .. })) => {
            assert_eq!(*index, 1);
        }
        other => panic!("expected schema mismatch, got {other:?}"),
    }
    assert_eq!(outcome.rows().len(), 10);
}

#[tokio::test]
async fn unreachable_backend_falls_back() {
    let config = BackendConfig::new("http://127.0.0.1:9", SecretString::from("k".to_owned()));
    let service = DataService::connect(Some(&config)).with_fallback_delay(Duration::ZERO);

    let products = service.fetch_products().await;
    assert_eq!(products, fixtures::products());
}
