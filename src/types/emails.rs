//! Email send types.
//!
//! Transactional and marketing mail go through the same endpoint; the
//! [`EmailCategory`] and the tags/metadata attached to the message are what
//! tell them apart in the provider's reporting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::common::EmailAddress;
use crate::errors::{EspError, EspResult};

/// Reporting category of an outbound message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailCategory {
    /// Triggered by a user action (receipts, password resets).
    #[default]
    Transactional,
    /// Bulk or promotional mail.
    Marketing,
}

/// Request to send a single email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendEmailRequest {
    /// Sender.
    pub from: EmailAddress,
    /// Recipients.
    pub to: Vec<EmailAddress>,
    /// Reply-to address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<EmailAddress>,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Plain-text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Reporting category.
    pub category: EmailCategory,
    /// Free-form tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Custom metadata echoed back in webhook events.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    /// Track opens with a pixel.
    pub track_opens: bool,
    /// Rewrite links for click tracking.
    pub track_clicks: bool,
}

impl SendEmailRequest {
    /// Creates a new builder.
    pub fn builder() -> SendEmailRequestBuilder {
        SendEmailRequestBuilder::default()
    }
}

/// Builder for [`SendEmailRequest`].
#[derive(Debug, Default)]
pub struct SendEmailRequestBuilder {
    from: Option<EmailAddress>,
    to: Vec<EmailAddress>,
    reply_to: Option<EmailAddress>,
    subject: Option<String>,
    html: Option<String>,
    text: Option<String>,
    category: EmailCategory,
    tags: Vec<String>,
    metadata: BTreeMap<String, String>,
    track_opens: bool,
    track_clicks: bool,
}

impl SendEmailRequestBuilder {
    /// Sets the sender.
    pub fn from(mut self, address: EmailAddress) -> Self {
        self.from = Some(address);
        self
    }

    /// Adds a recipient.
    pub fn to(mut self, address: EmailAddress) -> Self {
        self.to.push(address);
        self
    }

    /// Sets the reply-to address.
    pub fn reply_to(mut self, address: EmailAddress) -> Self {
        self.reply_to = Some(address);
        self
    }

    /// Sets the subject.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the HTML body.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Sets the plain-text body.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the reporting category.
    pub fn category(mut self, category: EmailCategory) -> Self {
        self.category = category;
        self
    }

    /// Adds a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Adds a metadata entry.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Enables or disables open tracking.
    pub fn track_opens(mut self, enabled: bool) -> Self {
        self.track_opens = enabled;
        self
    }

    /// Enables or disables click tracking.
    pub fn track_clicks(mut self, enabled: bool) -> Self {
        self.track_clicks = enabled;
        self
    }

    /// Builds the request.
    pub fn build(self) -> EspResult<SendEmailRequest> {
        let from = self
            .from
            .ok_or_else(|| EspError::validation("Sender address is required"))?;

        if self.to.is_empty() {
            return Err(EspError::validation("At least one recipient is required"));
        }

        let subject = self
            .subject
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| EspError::validation("Subject is required"))?;

        if self.text.is_none() && self.html.is_none() {
            return Err(EspError::validation(
                "Email body is required (text or HTML)",
            ));
        }

        Ok(SendEmailRequest {
            from,
            to: self.to,
            reply_to: self.reply_to,
            subject,
            html: self.html,
            text: self.text,
            category: self.category,
            tags: self.tags,
            metadata: self.metadata,
            track_opens: self.track_opens,
            track_clicks: self.track_clicks,
        })
    }
}

/// Response to a send request.
#[derive(Debug, Clone, Deserialize)]
pub struct SendEmailResponse {
    /// Provider-assigned message ID.
    pub message_id: String,
    /// Initial status (usually `queued`).
    #[serde(default)]
    pub status: Option<String>,
}
