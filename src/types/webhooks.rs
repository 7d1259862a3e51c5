//! Webhook types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event a webhook can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEvent {
    /// Message accepted by the recipient server.
    Delivered,
    /// Message bounced.
    Bounced,
    /// Message opened.
    Opened,
    /// Tracked link clicked.
    Clicked,
    /// Recipient unsubscribed.
    Unsubscribed,
    /// Recipient marked the message as spam.
    SpamReport,
    /// Message dropped before sending.
    Dropped,
}

/// A webhook subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct Webhook {
    /// Webhook ID.
    pub id: String,
    /// Target URL.
    pub url: String,
    /// Subscribed events.
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
    /// Whether deliveries are enabled.
    #[serde(default)]
    pub active: bool,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request to create a webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateWebhookRequest {
    /// Target URL.
    pub url: String,
    /// Events to subscribe to.
    pub events: Vec<WebhookEvent>,
    /// Optional display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether deliveries start enabled.
    pub active: bool,
}

impl CreateWebhookRequest {
    /// Creates an active webhook request.
    pub fn new(url: impl Into<String>, events: Vec<WebhookEvent>) -> Self {
        Self {
            url: url.into(),
            events,
            name: None,
            active: true,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
