//! Configuration module for the ESP client.
//!
//! Provides configuration management including API keys, key scope, base
//! URLs and timeouts.

use secrecy::SecretString;
use std::time::Duration;

use crate::auth::AuthScope;
use crate::errors::{EspError, EspResult};

/// Default base URL for the ESP API.
pub const DEFAULT_BASE_URL: &str = "https://api.esp.example.com";

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the ESP client.
#[derive(Clone)]
pub struct EspConfig {
    /// API key for authentication (stored securely).
    pub(crate) api_key: SecretString,
    /// Which header the key is sent under.
    pub auth_scope: AuthScope,
    /// Base URL for API requests.
    pub base_url: String,
    /// API version path segment.
    pub api_version: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Custom headers to include in requests.
    pub custom_headers: Vec<(String, String)>,
}

impl EspConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> EspConfigBuilder {
        EspConfigBuilder::new()
    }

    /// Creates an account-scoped configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ESP_API_KEY` (required): API key for authentication
    /// - `ESP_BASE_URL` (optional): Custom base URL
    /// - `ESP_API_VERSION` (optional): API version path segment
    /// - `ESP_TIMEOUT` (optional): Request timeout in seconds
    pub fn from_env() -> EspResult<Self> {
        let api_key = std::env::var("ESP_API_KEY")
            .map_err(|_| EspError::configuration("ESP_API_KEY environment variable not set"))?;

        let mut builder = EspConfigBuilder::new().api_key(api_key);

        if let Ok(base_url) = std::env::var("ESP_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(version) = std::env::var("ESP_API_VERSION") {
            builder = builder.api_version(version);
        }

        if let Ok(timeout_str) = std::env::var("ESP_TIMEOUT") {
            if let Ok(timeout_secs) = timeout_str.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(timeout_secs));
            }
        }

        builder.build()
    }

    /// Returns the full URL for an endpoint.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            self.api_version,
            path.trim_start_matches('/')
        )
    }

    /// Returns a copy of this configuration using a different key and scope.
    pub fn with_credentials(&self, api_key: impl Into<String>, scope: AuthScope) -> EspResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(EspError::configuration("API key cannot be empty"));
        }

        Ok(Self {
            api_key: SecretString::new(api_key),
            auth_scope: scope,
            ..self.clone()
        })
    }
}

impl std::fmt::Debug for EspConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EspConfig")
            .field("api_key", &"[REDACTED]")
            .field("auth_scope", &self.auth_scope)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for `EspConfig`.
#[derive(Default)]
pub struct EspConfigBuilder {
    api_key: Option<String>,
    auth_scope: AuthScope,
    base_url: Option<String>,
    api_version: Option<String>,
    timeout: Option<Duration>,
    custom_headers: Vec<(String, String)>,
}

impl EspConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the scope of the API key.
    pub fn auth_scope(mut self, scope: AuthScope) -> Self {
        self.auth_scope = scope;
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the API version.
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a custom header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> EspResult<EspConfig> {
        let api_key = self
            .api_key
            .ok_or_else(|| EspError::configuration("API key is required"))?;

        if api_key.trim().is_empty() {
            return Err(EspError::configuration("API key cannot be empty"));
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(EspError::configuration(
                "Base URL must start with http:// or https://",
            ));
        }
        url::Url::parse(&base_url)?;

        Ok(EspConfig {
            api_key: SecretString::new(api_key),
            auth_scope: self.auth_scope,
            base_url,
            api_version: self
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            custom_headers: self.custom_headers,
        })
    }
}
