#![allow(clippy::unwrap_used)]
// Integration tests for `RestClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use luna_api::{Error, RestClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RestClient) {
    let server = MockServer::start().await;
    let key = SecretString::from("anon-key-123".to_owned());
    let client =
        RestClient::from_api_key(&server.uri(), &key, &TransportConfig::default()).unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_select_all_sends_auth_headers() {
    let (server, client) = setup().await;

    let body = json!([
        { "id": "#ORD-1", "customerName": "Ada", "status": "Pending",
          "amount": 10.0, "date": "2024-01-02", "items": 1 }
    ]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/orders"))
        .and(query_param("select", "*"))
        .and(header("apikey", "anon-key-123"))
        .and(header("authorization", "Bearer anon-key-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let rows = client.select_all("orders").await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["customerName"], "Ada");
}

#[tokio::test]
async fn test_select_typed_columns() {
    let (server, client) = setup().await;

    #[derive(serde::Deserialize)]
    struct IdOnly {
        id: String,
    }

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("select", "id"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": "PRD-1" }, { "id": "PRD-2" }])),
        )
        .mount(&server)
        .await;

    let rows: Vec<IdOnly> = client.select("products", "id").await.unwrap();
    let ids: Vec<_> = rows.into_iter().map(|r| r.id).collect();
    assert_eq!(ids, ["PRD-1", "PRD-2"]);
}

#[tokio::test]
async fn test_empty_table() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let rows = client.select_all("customers").await.unwrap();
    assert!(rows.is_empty());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_maps_to_invalid_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/orders"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid API key" })),
        )
        .mount(&server)
        .await;

    let result = client.select_all("orders").await;
    assert!(
        matches!(result, Err(Error::InvalidApiKey)),
        "expected InvalidApiKey, got: {result:?}"
    );
}

#[tokio::test]
async fn test_postgrest_error_body_is_parsed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/orders"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "42P01",
            "details": null,
            "hint": null,
            "message": "relation \"public.orders\" does not exist"
        })))
        .mount(&server)
        .await;

    let err = client.select_all("orders").await.unwrap_err();
    match &err {
        Error::Remote {
            status,
            code,
            message,
        } => {
            assert_eq!(*status, 404);
            assert_eq!(code.as_deref(), Some("42P01"));
            assert!(message.contains("does not exist"));
        }
        other => panic!("expected Remote error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/orders"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client.select_all("orders").await.unwrap_err();
    assert!(matches!(&err, Error::Remote { status: 502, message, .. } if message == "Bad Gateway"));
}

#[tokio::test]
async fn test_non_array_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rows": [] })))
        .mount(&server)
        .await;

    let err = client.select_all("orders").await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let key = SecretString::from("k".to_owned());
    // Port 9 (discard) is essentially never listening on loopback.
    let client =
        RestClient::from_api_key("http://127.0.0.1:9", &key, &TransportConfig::default())
            .unwrap();

    let err = client.select_all("orders").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
}
