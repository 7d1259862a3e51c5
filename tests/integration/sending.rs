//! Integration tests for sending and message lookup

use super::*;
use integrations_esp::services::{EmailsService, MessagesService};
use integrations_esp::{EmailAddress, EmailCategory, SendEmailRequest};
use serde_json::json;
use wiremock::matchers::body_partial_json;

fn order_confirmation() -> SendEmailRequest {
    SendEmailRequest::builder()
        .from(EmailAddress::with_name("Acme Shop", "shop@acme.test").unwrap())
        .to(EmailAddress::new("jane@example.com").unwrap())
        .subject("Your order confirmation")
        .text("Thanks for your order.")
        .tag("order-confirmation")
        .metadata("order_id", "1001")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_send_transactional_email() {
    let server = setup_mock_server().await;

    subaccount_mock("POST", "/v1/email/send")
        .and(body_partial_json(json!({
            "from": {"email": "shop@acme.test", "name": "Acme Shop"},
            "to": [{"email": "jane@example.com"}],
            "subject": "Your order confirmation",
            "category": "transactional",
            "tags": ["order-confirmation"],
            "metadata": {"order_id": "1001"}
        })))
        .respond_with(success_response(json!({"message_id": "msg_1", "status": "queued"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = subaccount_client(&server)
        .emails()
        .send(order_confirmation())
        .await
        .unwrap();

    assert_eq!(response.message_id, "msg_1");
    assert_eq!(response.status.as_deref(), Some("queued"));
}

#[tokio::test]
async fn test_send_marketing_email_enables_tracking() {
    let server = setup_mock_server().await;

    subaccount_mock("POST", "/v1/email/send")
        .and(body_partial_json(json!({
            "category": "marketing",
            "track_opens": true,
            "track_clicks": true
        })))
        .respond_with(success_response(json!({"message_id": "msg_2"})))
        .expect(1)
        .mount(&server)
        .await;

    let request = SendEmailRequest::builder()
        .from(EmailAddress::new("news@acme.test").unwrap())
        .to(EmailAddress::new("jane@example.com").unwrap())
        .subject("This month's highlights")
        .html("<p>News</p>")
        .category(EmailCategory::Marketing)
        .track_opens(true)
        .track_clicks(true)
        .build()
        .unwrap();

    let response = subaccount_client(&server).emails().send(request).await.unwrap();

    assert_eq!(response.message_id, "msg_2");
    assert!(response.status.is_none());
}

#[tokio::test]
async fn test_lookup_message_encodes_id() {
    let server = setup_mock_server().await;

    subaccount_mock("GET", "/v1/messages/msg%2F42")
        .respond_with(success_response(json!({
            "message_id": "msg/42",
            "status": "delivered",
            "subject": "Your order confirmation",
            "events": [
                {"event": "processed", "timestamp": "2024-03-01T10:00:00Z"},
                {"event": "delivered", "timestamp": "2024-03-01T10:00:02Z", "detail": "250 OK"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let details = subaccount_client(&server)
        .messages()
        .get("msg/42")
        .await
        .unwrap();

    assert_eq!(details.status, "delivered");
    assert_eq!(
        details.latest_event().map(|e| e.event.as_str()),
        Some("delivered")
    );
}
