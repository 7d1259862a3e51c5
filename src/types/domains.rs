//! Sending domain types.

use serde::{Deserialize, Serialize};

/// Verification state of a sending domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    /// DNS records not yet verified.
    Pending,
    /// All DNS records verified.
    Verified,
    /// Verification failed.
    Failed,
    /// Status the client does not know about.
    #[serde(other)]
    Unknown,
}

/// DNS record the domain owner must publish.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsRecord {
    /// Record type (TXT, CNAME, MX).
    pub record_type: String,
    /// Host name.
    pub host: String,
    /// Expected value.
    pub value: String,
    /// Whether the provider has seen the record.
    #[serde(default)]
    pub valid: bool,
}

/// A sending domain.
#[derive(Debug, Clone, Deserialize)]
pub struct Domain {
    /// Domain name.
    pub domain: String,
    /// Verification state.
    pub status: DomainStatus,
    /// Records required for verification.
    #[serde(default)]
    pub dns_records: Vec<DnsRecord>,
}

impl Domain {
    /// Returns the records the provider has not yet seen.
    pub fn pending_records(&self) -> impl Iterator<Item = &DnsRecord> {
        self.dns_records.iter().filter(|r| !r.valid)
    }
}

/// Request to add a sending domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddDomainRequest {
    /// Domain name.
    pub domain: String,
}

impl AddDomainRequest {
    /// Creates a request for a domain.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }
}
