//! Sub-account types.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Sub-account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubaccountStatus {
    /// Can send.
    Active,
    /// Sending paused by the account owner.
    Paused,
    /// Sending blocked by the provider.
    Suspended,
    /// Status the client does not know about.
    #[serde(other)]
    Unknown,
}

/// A sub-account of the sending account.
#[derive(Debug, Clone, Deserialize)]
pub struct Subaccount {
    /// Sub-account ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Current status.
    #[serde(default = "default_status")]
    pub status: SubaccountStatus,
    /// API key of the sub-account. Only returned on creation.
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_status() -> SubaccountStatus {
    SubaccountStatus::Unknown
}

/// Request to create a sub-account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSubaccountRequest {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Company name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Daily sending cap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_send_limit: Option<u32>,
}

impl CreateSubaccountRequest {
    /// Creates a request with the required fields.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            company: None,
            daily_send_limit: None,
        }
    }

    /// Sets the company name.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Sets the daily sending cap.
    pub fn with_daily_send_limit(mut self, limit: u32) -> Self {
        self.daily_send_limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_subaccount_deserialization_with_key() {
        let json = r#"{
            "id": "sa_123",
            "name": "Acme Billing",
            "email": "billing@acme.test",
            "status": "active",
            "api_key": "sub-key-xyz",
            "created_at": "2024-05-01T12:00:00Z"
        }"#;

        let sub: Subaccount = serde_json::from_str(json).unwrap();
        assert_eq!(sub.id, "sa_123");
        assert_eq!(sub.status, SubaccountStatus::Active);
        assert_eq!(
            sub.api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("sub-key-xyz")
        );
        assert!(!format!("{:?}", sub).contains("sub-key-xyz"));
    }

    #[test]
    fn test_unknown_status_tolerated() {
        let sub: Subaccount =
            serde_json::from_str(r#"{"id":"sa_1","name":"x","status":"archived"}"#).unwrap();
        assert_eq!(sub.status, SubaccountStatus::Unknown);
        assert!(sub.api_key.is_none());
    }

    #[test]
    fn test_create_request_skips_unset_fields() {
        let request = CreateSubaccountRequest::new("Acme", "ops@acme.test");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["name"], "Acme");
        assert!(json.get("company").is_none());
        assert!(json.get("daily_send_limit").is_none());
    }
}
