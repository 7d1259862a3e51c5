//! Integration tests for error mapping

use super::*;
use integrations_esp::services::{IpsService, MessagesService, SubaccountsService};
use integrations_esp::{EspError, ListOptions};
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_unauthorized_maps_to_api_error() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/v1/subaccounts"))
        .respond_with(
            error_response(401, "Invalid API key").insert_header("x-request-id", "req_123"),
        )
        .mount(&server)
        .await;

    let err = account_client(&server)
        .subaccounts()
        .list(ListOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_auth_error());
    assert_eq!(err.status(), Some(401));
    match err {
        EspError::Api {
            message,
            code,
            body,
            request_id,
            ..
        } => {
            assert_eq!(message, "Invalid API key");
            assert_eq!(code.as_deref(), Some("test_error"));
            assert!(body.contains("Invalid API key"));
            assert_eq!(request_id.as_deref(), Some("req_123"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_with_plain_body() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/v1/messages/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such message"))
        .mount(&server)
        .await;

    let err = subaccount_client(&server)
        .messages()
        .get("missing")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.body(), Some("no such message"));
    assert_eq!(err.to_string(), "API error (HTTP 404): HTTP 404 error");
}

#[tokio::test]
async fn test_malformed_success_body_is_deserialization_error() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/v1/ips"))
        .respond_with(success_response(json!({"data": "not-a-list"})))
        .mount(&server)
        .await;

    let err = account_client(&server).ips().list().await.unwrap_err();

    assert!(matches!(err, EspError::Deserialization { .. }));
    assert!(!err.is_api_error());
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/v1/ips"))
        .respond_with(success_response(json!({"data": []})).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = EspClient::builder()
        .api_key(ACCOUNT_KEY)
        .base_url(server.uri())
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let err = client.ips().list().await.unwrap_err();

    assert!(matches!(err, EspError::Timeout { .. }));
}

#[tokio::test]
async fn test_connection_error_keeps_source() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = EspClient::builder()
        .api_key(ACCOUNT_KEY)
        .base_url(format!("http://127.0.0.1:{}", port))
        .build()
        .unwrap();

    let err = client.ips().list().await.unwrap_err();

    assert!(matches!(err, EspError::Connection { source: Some(_), .. }));
    assert!(!err.causes().is_empty());
    assert!(err.with_causes().len() > err.to_string().len());
}
