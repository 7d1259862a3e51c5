//! Authentication module for the ESP client.
//!
//! The provider authenticates every request with an API key sent in a
//! header. Which header depends on the key's scope: the parent account's key
//! manages sub-accounts, IPs and account-wide stats, while a sub-account key
//! sends mail and manages that sub-account's webhooks and domains.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::fmt;

use crate::config::EspConfig;

/// Header carrying an account-level API key.
pub const ACCOUNT_KEY_HEADER: &str = "X-Api-Key";

/// Header carrying a sub-account-level API key.
pub const SUBACCOUNT_KEY_HEADER: &str = "X-Subaccount-Api-Key";

/// Scope an API key belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AuthScope {
    /// Parent account key.
    #[default]
    Account,
    /// Sub-account key.
    Subaccount,
}

impl AuthScope {
    /// Returns the header name used for this scope.
    pub fn header_name(&self) -> &'static str {
        match self {
            AuthScope::Account => ACCOUNT_KEY_HEADER,
            AuthScope::Subaccount => SUBACCOUNT_KEY_HEADER,
        }
    }
}

impl fmt::Display for AuthScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthScope::Account => write!(f, "account"),
            AuthScope::Subaccount => write!(f, "subaccount"),
        }
    }
}

/// Trait for authentication managers.
pub trait AuthManager: Send + Sync {
    /// Returns the headers to attach to every request.
    fn get_headers(&self) -> HashMap<String, String>;

    /// Validates the API key format.
    fn validate_api_key(&self) -> Result<(), String>;

    /// Returns the scope of the managed key.
    fn scope(&self) -> AuthScope;
}

/// API key authentication manager.
pub struct ApiKeyAuthManager {
    api_key: SecretString,
    scope: AuthScope,
    custom_headers: Vec<(String, String)>,
}

impl ApiKeyAuthManager {
    /// Creates a new auth manager from config.
    pub fn new(config: &EspConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            scope: config.auth_scope,
            custom_headers: config.custom_headers.clone(),
        }
    }

    /// Creates a new auth manager for a bare key.
    pub fn with_api_key(api_key: impl Into<String>, scope: AuthScope) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            scope,
            custom_headers: Vec::new(),
        }
    }
}

impl AuthManager for ApiKeyAuthManager {
    fn get_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();

        headers.insert(
            self.scope.header_name().to_string(),
            self.api_key.expose_secret().clone(),
        );
        headers.insert(
            "Content-Type".to_string(),
            mime::APPLICATION_JSON.to_string(),
        );
        headers.insert("Accept".to_string(), mime::APPLICATION_JSON.to_string());

        for (key, value) in &self.custom_headers {
            headers.insert(key.clone(), value.clone());
        }

        headers
    }

    fn validate_api_key(&self) -> Result<(), String> {
        let key = self.api_key.expose_secret();

        if key.trim().is_empty() {
            return Err("API key cannot be empty".to_string());
        }

        if key.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err("API key contains whitespace or control characters".to_string());
        }

        Ok(())
    }

    fn scope(&self) -> AuthScope {
        self.scope
    }
}

impl fmt::Debug for ApiKeyAuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuthManager")
            .field("api_key", &"[REDACTED]")
            .field("scope", &self.scope)
            .field("custom_headers", &self.custom_headers.len())
            .finish()
    }
}
