//! Message lookup types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single delivery event recorded for a message.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageEvent {
    /// Event name (`queued`, `delivered`, `opened`, ...).
    pub event: String,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Extra detail, e.g. the bounce reason.
    #[serde(default)]
    pub detail: Option<String>,
}

/// Details of a sent message.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDetails {
    /// Provider-assigned message ID.
    pub message_id: String,
    /// Latest status.
    pub status: String,
    /// Sender address.
    #[serde(default)]
    pub from: Option<String>,
    /// Recipient addresses.
    #[serde(default)]
    pub to: Vec<String>,
    /// Subject line.
    #[serde(default)]
    pub subject: Option<String>,
    /// Events in the order they happened.
    #[serde(default)]
    pub events: Vec<MessageEvent>,
}

impl MessageDetails {
    /// Returns the most recent event, if any.
    pub fn latest_event(&self) -> Option<&MessageEvent> {
        self.events.iter().max_by_key(|e| e.timestamp)
    }
}
