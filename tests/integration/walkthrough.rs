//! Integration tests for the walkthrough driver

use super::*;
use integrations_esp::walkthrough::{Step, StepOutcome, Walkthrough, WalkthroughSettings};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, query_param};

const FRESH_KEY: &str = "fresh-subaccount-key";

fn settings(server: &MockServer) -> WalkthroughSettings {
    WalkthroughSettings {
        base_url: server.uri(),
        account_api_key: ACCOUNT_KEY.to_string(),
        subaccount_api_key: SUBACCOUNT_KEY.to_string(),
        sender: "shop@acme.test".to_string(),
        recipient: "jane@example.com".to_string(),
        lookup_delay: Duration::ZERO,
        ..Default::default()
    }
}

fn fresh_mock(method_matcher: &str, path_matcher: &str) -> MockBuilder {
    Mock::given(method(method_matcher))
        .and(path(path_matcher))
        .and(header("X-Subaccount-Api-Key", FRESH_KEY))
}

fn stats_body() -> serde_json::Value {
    json!({
        "start_date": "2024-03-01",
        "end_date": "2024-03-07",
        "totals": {"requests": 4, "delivered": 4}
    })
}

async fn mount_provider(server: &MockServer) {
    account_mock("GET", "/v1/subaccounts")
        .and(query_param("limit", "10"))
        .respond_with(success_response(json!({"data": []})))
        .expect(1)
        .mount(server)
        .await;
    account_mock("POST", "/v1/subaccounts")
        .and(body_partial_json(json!({"name": "demo-subaccount-it"})))
        .respond_with(success_response(json!({
            "id": "sa_it", "name": "demo-subaccount-it", "status": "active", "api_key": FRESH_KEY
        })))
        .expect(1)
        .mount(server)
        .await;
    fresh_mock("POST", "/v1/webhooks")
        .respond_with(success_response(json!({
            "id": "wh_it", "url": "https://example.com/webhooks/esp",
            "events": ["delivered", "bounced", "opened", "clicked"], "active": true
        })))
        .expect(1)
        .mount(server)
        .await;
    fresh_mock("GET", "/v1/webhooks")
        .respond_with(success_response(json!({"data": []})))
        .expect(1)
        .mount(server)
        .await;
    fresh_mock("POST", "/v1/domains")
        .respond_with(success_response(json!({"domain": "mail.example.com", "status": "pending"})))
        .expect(1)
        .mount(server)
        .await;
    fresh_mock("GET", "/v1/domains")
        .respond_with(success_response(json!({"data": []})))
        .expect(1)
        .mount(server)
        .await;
    fresh_mock("POST", "/v1/email/send")
        .and(body_partial_json(json!({"category": "transactional"})))
        .respond_with(success_response(json!({"message_id": "msg_it", "status": "queued"})))
        .expect(1)
        .mount(server)
        .await;
    fresh_mock("POST", "/v1/email/send")
        .and(body_partial_json(json!({"category": "marketing"})))
        .respond_with(success_response(json!({"message_id": "msg_mk", "status": "queued"})))
        .expect(1)
        .mount(server)
        .await;
    account_mock("GET", "/v1/stats/subaccounts/sa_it")
        .respond_with(success_response(stats_body()))
        .expect(1)
        .mount(server)
        .await;
    fresh_mock("GET", "/v1/stats/aggregate")
        .respond_with(success_response(stats_body()))
        .expect(1)
        .mount(server)
        .await;
    account_mock("GET", "/v1/stats/account")
        .respond_with(success_response(stats_body()))
        .expect(1)
        .mount(server)
        .await;
    account_mock("GET", "/v1/ips")
        .respond_with(success_response(json!({"data": [{"ip": "192.0.2.10"}]})))
        .expect(1)
        .mount(server)
        .await;
    account_mock("GET", "/v1/ip-pools")
        .respond_with(success_response(json!({"data": []})))
        .expect(1)
        .mount(server)
        .await;
    account_mock("POST", "/v1/ip-pools")
        .and(body_partial_json(json!({"name": "demo-pool-it", "routing_strategy": "round_robin"})))
        .respond_with(success_response(json!({"name": "demo-pool-it", "routing_strategy": "round_robin"})))
        .expect(1)
        .mount(server)
        .await;
    account_mock("GET", "/v1/ip-pools/demo-pool-it")
        .respond_with(success_response(json!({"name": "demo-pool-it", "ips": []})))
        .expect(1)
        .mount(server)
        .await;
    fresh_mock("GET", "/v1/messages/msg_it")
        .respond_with(success_response(json!({
            "message_id": "msg_it",
            "status": "delivered",
            "events": [{"event": "delivered", "timestamp": "2024-03-01T10:00:02Z"}]
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_walkthrough_against_provider() {
    let server = setup_mock_server().await;
    mount_provider(&server).await;

    let mut walkthrough = Walkthrough::new(settings(&server))
        .unwrap()
    .with_run_id("it");

    let report = walkthrough.run().await;

    assert_eq!(report.succeeded(), Step::ALL.len(), "{:?}", report.entries());
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), Step::ALL.len());
    assert_eq!(received.last().unwrap().url.path(), "/v1/messages/msg_it");
}

#[tokio::test]
async fn test_walkthrough_survives_rejected_keys() {
    let server = setup_mock_server().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(error_response(401, "Invalid API key"))
        .mount(&server)
        .await;

    let mut walkthrough = Walkthrough::new(settings(&server)).unwrap();
    let report = walkthrough.run().await;

    assert_eq!(report.entries().len(), Step::ALL.len());
    assert_eq!(report.succeeded(), 0);
    assert_eq!(
        report.outcome(Step::AccountStats),
        Some(&StepOutcome::ApiFailure {
            status: 401,
            message: "Invalid API key".to_string()
        })
    );
    assert!(matches!(
        report.outcome(Step::GetIpPool),
        Some(StepOutcome::Skipped { .. })
    ));
}

#[tokio::test]
async fn test_refused_connection_reports_cause() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let settings = WalkthroughSettings {
        base_url: format!("http://127.0.0.1:{}", port),
        account_api_key: ACCOUNT_KEY.to_string(),
        subaccount_api_key: SUBACCOUNT_KEY.to_string(),
        lookup_delay: Duration::ZERO,
        ..Default::default()
    };

    let report = Walkthrough::new(settings).unwrap().run().await;

    assert_eq!(report.entries().len(), Step::ALL.len());
    match report.outcome(Step::ListSubaccounts) {
        Some(StepOutcome::Failure { message }) => {
            assert!(message.starts_with("Connection error"), "{}", message);
            assert!(
                message.to_lowercase().contains("refused"),
                "cause missing from {}",
                message
            );
        }
        other => panic!("expected connection failure, got {:?}", other),
    }
}
