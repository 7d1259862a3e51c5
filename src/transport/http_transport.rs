//! HTTP transport implementation using reqwest.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::time::Duration;

use super::{HttpResponse, HttpTransport, Method};
use crate::config::EspConfig;
use crate::errors::{EspError, EspResult};
use crate::observability::{log_request, log_response};

/// Settings for [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Maximum idle connections kept per host.
    pub pool_max_idle_per_host: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: crate::config::DEFAULT_TIMEOUT,
            pool_max_idle_per_host: 10,
        }
    }
}

impl From<&EspConfig> for TransportConfig {
    fn from(config: &EspConfig) -> Self {
        Self {
            timeout: config.timeout,
            ..Default::default()
        }
    }
}

/// Reqwest-based HTTP transport implementation.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a new transport with configuration.
    pub fn with_config(config: TransportConfig) -> EspResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()
            .map_err(|e| EspError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Creates a new transport around an existing reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Converts response headers to a HashMap.
    fn extract_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|val| (k.as_str().to_string(), val.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        method: Method,
        url: String,
        headers: HashMap<String, String>,
        body: Option<Bytes>,
    ) -> EspResult<HttpResponse> {
        log_request(&method.to_string(), &url, body.as_deref());

        let mut request = self.client.request(method.into(), &url);

        for (key, value) in &headers {
            request = request.header(key, value);
        }

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let response_headers = Self::extract_headers(response.headers());
        let body = response.bytes().await?;

        log_response(status, &url, &body);

        if status >= 400 {
            return Err(EspError::from_response(status, &response_headers, &body));
        }

        Ok(HttpResponse {
            status,
            headers: response_headers,
            body,
        })
    }
}
