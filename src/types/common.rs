//! Common types shared across the API.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{EspError, EspResult};

/// Envelope returned by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Total number of items across all pages, when the endpoint reports it.
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> ListResponse<T> {
    /// Returns the number of items on this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Pagination options for list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListOptions {
    /// Maximum number of items to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of items to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl ListOptions {
    /// Creates options with a page size.
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: None,
        }
    }

    /// Returns the options as query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset".to_string(), offset.to_string()));
        }
        query
    }
}

/// Email address with optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress {
    /// Email address (e.g., "jane@example.com").
    pub email: String,
    /// Display name (e.g., "Jane Doe").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    /// Creates a new address with just an email.
    pub fn new(email: impl Into<String>) -> EspResult<Self> {
        let email = email.into();
        Self::validate(&email)?;
        Ok(Self { email, name: None })
    }

    /// Creates a new address with display name and email.
    pub fn with_name(name: impl Into<String>, email: impl Into<String>) -> EspResult<Self> {
        let email = email.into();
        Self::validate(&email)?;
        Ok(Self {
            email,
            name: Some(name.into()),
        })
    }

    fn validate(email: &str) -> EspResult<()> {
        if email.is_empty() {
            return Err(EspError::validation("Email address cannot be empty"));
        }

        if email.len() > 254 {
            return Err(EspError::validation(
                "Email address too long (max 254 characters)",
            ));
        }

        if email.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(EspError::validation(
                "Email address cannot contain whitespace or control characters",
            ));
        }

        match email.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(())
            }
            _ => Err(EspError::validation(format!(
                "Invalid email address: {}",
                email
            ))),
        }
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.email),
            None => write!(f, "{}", self.email),
        }
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = EspError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EspError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
