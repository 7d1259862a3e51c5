//! Integration tests using WireMock
//!
//! These tests drive the real reqwest transport against a mock HTTP server
//! and check method, path, authentication header and body of every call,
//! plus error mapping and a full walkthrough run.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod accounts;
mod errors;
mod reporting;
mod sending;
mod walkthrough;

use integrations_esp::{AuthScope, EspClient};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

/// Account key used by the test clients.
pub const ACCOUNT_KEY: &str = "test-account-key";

/// Sub-account key used by the test clients.
pub const SUBACCOUNT_KEY: &str = "test-subaccount-key";

/// Starts a fresh mock server.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Account-scoped client pointed at `server`.
pub fn account_client(server: &MockServer) -> EspClient {
    EspClient::builder()
        .api_key(ACCOUNT_KEY)
        .scope(AuthScope::Account)
        .base_url(server.uri())
        .build()
        .expect("Failed to build client")
}

/// Sub-account-scoped client pointed at `server`.
pub fn subaccount_client(server: &MockServer) -> EspClient {
    EspClient::builder()
        .api_key(SUBACCOUNT_KEY)
        .scope(AuthScope::Subaccount)
        .base_url(server.uri())
        .build()
        .expect("Failed to build client")
}

/// Matches a request authenticated with the account key.
pub fn account_mock(method_matcher: &str, path_matcher: &str) -> MockBuilder {
    Mock::given(method(method_matcher))
        .and(path(path_matcher))
        .and(header("X-Api-Key", ACCOUNT_KEY))
}

/// Matches a request authenticated with the sub-account key.
pub fn subaccount_mock(method_matcher: &str, path_matcher: &str) -> MockBuilder {
    Mock::given(method(method_matcher))
        .and(path(path_matcher))
        .and(header("X-Subaccount-Api-Key", SUBACCOUNT_KEY))
}

/// Successful JSON response.
pub fn success_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

/// Error response in the provider's envelope.
pub fn error_response(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(serde_json::json!({
        "error": { "message": message, "code": "test_error" }
    }))
}
