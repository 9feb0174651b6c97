//! Tests for the HTTP transport against a wiremock panel.
//!
//! Covers status mapping, empty bodies, query encoding and retries of
//! transient failures.

use ptero_app::{AppConfig, FetchOptions, HttpTransport, PteroApp};
use ptero_core::{Error, Query, Transport, TransportError};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn transport_with_retries(server: &MockServer, max_retries: u32) -> HttpTransport {
    let config = AppConfig {
        max_retries,
        timeout_secs: 5,
        ..AppConfig::new(server.uri(), "ptla_test")
    };
    HttpTransport::new(&config).expect("config is valid")
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/locations"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_with_retries(&server, 3).await;
    let err = transport.get("/locations", &Query::default()).await.unwrap_err();
    assert_eq!(err, TransportError::AuthenticationFailed);
}

#[tokio::test]
async fn test_not_found_carries_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/users/99"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_with_retries(&server, 3).await;
    let err = transport.get("/users/99", &Query::default()).await.unwrap_err();
    assert_eq!(err, TransportError::NotFound("/users/99".to_string()));
}

#[tokio::test]
async fn test_unprocessable_entity_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/application/locations"))
        .respond_with(ResponseTemplate::new(422).set_body_string("short is required"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_with_retries(&server, 3).await;
    let err = transport
        .post("/locations", &json!({ "long": "canada" }))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TransportError::Api {
            status: 422,
            message: "short is required".to_string()
        }
    );
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/locations/1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/application/locations/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "attributes": { "id": 1 } })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_with_retries(&server, 1).await;
    let body = transport.get("/locations/1", &Query::default()).await.unwrap();
    assert_eq!(body.pointer("/attributes/id"), Some(&json!(1)));
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/servers"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let transport = transport_with_retries(&server, 2).await;
    let err = transport.get("/servers", &Query::default()).await.unwrap_err();
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn test_empty_body_is_null() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/application/servers/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_with_retries(&server, 0).await;
    let body = transport.delete("/servers/5").await.unwrap();
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_invalid_json_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let transport = transport_with_retries(&server, 0).await;
    let err = transport.get("/locations", &Query::default()).await.unwrap_err();
    assert!(matches!(err, TransportError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_query_encoding() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/servers"))
        .and(header("Authorization", "Bearer ptla_test"))
        .and(query_param("include", "egg,node"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "25"))
        .and(query_param("filter[name]", "survival"))
        .and(query_param("sort", "-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let query = Query {
        include: vec!["egg".to_string(), "node".to_string()],
        page: Some(2),
        per_page: Some(25),
        filter: Some(("name".to_string(), "survival".to_string())),
        sort: Some("-id".to_string()),
    };

    let transport = transport_with_retries(&server, 0).await;
    transport.get("/servers", &query).await.unwrap();
}

#[tokio::test]
async fn test_transport_errors_pass_through_managers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/application/locations/3"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = PteroApp::new(AppConfig {
        max_retries: 0,
        ..AppConfig::new(server.uri(), "ptla_test")
    })
    .unwrap();

    let err = app.locations.fetch(3, &FetchOptions::new()).await.unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::AuthenticationFailed)));
    assert!(app.locations.cache().is_empty());
}
