//! Mock implementations for testing.

pub mod transport;

pub use transport::{MockResponse, MockTransport, RecordedRequest};

use std::sync::Arc;

use crate::auth::{ApiKeyAuthManager, AuthScope};
use crate::config::EspConfig;
use crate::services::ApiContext;

/// Base URL used by [`mock_context`].
pub const MOCK_BASE_URL: &str = "http://esp.mock";

/// Builds an [`ApiContext`] that sends through `transport` with a fixed key.
pub fn mock_context(transport: &MockTransport, scope: AuthScope) -> ApiContext {
    let config = EspConfig {
        api_key: secrecy::SecretString::new("mock-api-key".to_string()),
        auth_scope: scope,
        base_url: MOCK_BASE_URL.to_string(),
        api_version: crate::config::DEFAULT_API_VERSION.to_string(),
        timeout: crate::config::DEFAULT_TIMEOUT,
        custom_headers: Vec::new(),
    };
    let auth = Arc::new(ApiKeyAuthManager::new(&config));

    ApiContext::new(Arc::new(config), Arc::new(transport.clone()), auth)
}
