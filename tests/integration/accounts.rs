//! Integration tests for sub-accounts, webhooks and domains

use super::*;
use integrations_esp::services::{DomainsService, SubaccountsService, WebhooksService};
use integrations_esp::types::domains::DomainStatus;
use integrations_esp::{
    AddDomainRequest, CreateSubaccountRequest, CreateWebhookRequest, EspError, ListOptions,
    WebhookEvent,
};
use secrecy::ExposeSecret;
use serde_json::json;
use wiremock::matchers::{body_partial_json, query_param};

#[tokio::test]
async fn test_list_subaccounts_sends_limit() {
    let server = setup_mock_server().await;

    account_mock("GET", "/v1/subaccounts")
        .and(query_param("limit", "10"))
        .respond_with(success_response(json!({
            "data": [
                {"id": "sa_1", "name": "east", "status": "active"},
                {"id": "sa_2", "name": "west", "status": "suspended"}
            ],
            "total": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = account_client(&server)
        .subaccounts()
        .list(ListOptions::with_limit(10))
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.total, Some(2));
    assert_eq!(page.data[1].name, "west");
}

#[tokio::test]
async fn test_create_subaccount_returns_key() {
    let server = setup_mock_server().await;

    account_mock("POST", "/v1/subaccounts")
        .and(body_partial_json(json!({
            "name": "demo-subaccount-1",
            "email": "demo+1@example.com",
            "daily_send_limit": 1000
        })))
        .respond_with(success_response(json!({
            "id": "sa_new",
            "name": "demo-subaccount-1",
            "status": "active",
            "api_key": "sub-secret"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = account_client(&server)
        .subaccounts()
        .create(
            CreateSubaccountRequest::new("demo-subaccount-1", "demo+1@example.com")
                .with_daily_send_limit(1000),
        )
        .await
        .unwrap();

    assert_eq!(created.id, "sa_new");
    assert_eq!(
        created.api_key.as_ref().map(|k| k.expose_secret().as_str()),
        Some("sub-secret")
    );
}

#[tokio::test]
async fn test_create_and_list_webhooks_with_subaccount_key() {
    let server = setup_mock_server().await;

    subaccount_mock("POST", "/v1/webhooks")
        .and(body_partial_json(json!({
            "url": "https://hooks.acme.test/esp",
            "events": ["delivered", "bounced"],
            "active": true
        })))
        .respond_with(success_response(json!({
            "id": "wh_1",
            "url": "https://hooks.acme.test/esp",
            "events": ["delivered", "bounced"],
            "active": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    subaccount_mock("GET", "/v1/webhooks")
        .respond_with(success_response(json!({
            "data": [{"id": "wh_1", "url": "https://hooks.acme.test/esp", "active": true}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = subaccount_client(&server);
    let webhook = client
        .webhooks()
        .create(CreateWebhookRequest::new(
            "https://hooks.acme.test/esp",
            vec![WebhookEvent::Delivered, WebhookEvent::Bounced],
        ))
        .await
        .unwrap();
    let page = client.webhooks().list().await.unwrap();

    assert_eq!(webhook.id, "wh_1");
    assert_eq!(page.data[0].id, webhook.id);
}

#[tokio::test]
async fn test_invalid_webhook_never_reaches_server() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(success_response(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let result = subaccount_client(&server)
        .webhooks()
        .create(CreateWebhookRequest::new("not a url", vec![WebhookEvent::Opened]))
        .await;

    assert!(matches!(result, Err(EspError::Validation { .. })));
}

#[tokio::test]
async fn test_add_and_list_domains() {
    let server = setup_mock_server().await;

    subaccount_mock("POST", "/v1/domains")
        .and(body_partial_json(json!({"domain": "mail.acme.test"})))
        .respond_with(success_response(json!({
            "domain": "mail.acme.test",
            "status": "pending",
            "dns_records": [
                {"record_type": "TXT", "host": "mail.acme.test", "value": "v=spf1 include:esp ~all", "valid": false},
                {"record_type": "CNAME", "host": "esp._domainkey.mail.acme.test", "value": "dkim.esp.example.com", "valid": true}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    subaccount_mock("GET", "/v1/domains")
        .respond_with(success_response(json!({
            "data": [{"domain": "mail.acme.test", "status": "verified"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = subaccount_client(&server);
    let domain = client
        .domains()
        .add(AddDomainRequest::new("mail.acme.test"))
        .await
        .unwrap();
    let page = client.domains().list().await.unwrap();

    assert_eq!(domain.status, DomainStatus::Pending);
    assert_eq!(domain.pending_records().count(), 1);
    assert_eq!(page.data[0].status, DomainStatus::Verified);
}
