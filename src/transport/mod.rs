//! HTTP transport module for the ESP client.
//!
//! Services talk to the network only through [`HttpTransport`], so tests
//! can swap in a recording mock.

mod http_transport;

pub use http_transport::{ReqwestTransport, TransportConfig};

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;

use crate::errors::EspResult;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET request.
    Get,
    /// POST request.
    Post,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// HTTP response.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

/// Trait for HTTP transport implementations.
///
/// Implementations return `Err(EspError::Api { .. })` for any status of 400
/// or above, so callers only ever see successful responses.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes an HTTP request against an absolute URL.
    async fn execute(
        &self,
        method: Method,
        url: String,
        headers: HashMap<String, String>,
        body: Option<Bytes>,
    ) -> EspResult<HttpResponse>;
}
