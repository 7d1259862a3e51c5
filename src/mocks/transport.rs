//! Mock transport for testing.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::errors::{EspError, EspResult};
use crate::transport::{HttpResponse, HttpTransport, Method};

/// A recorded request for verification.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// Request URL.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<Bytes>,
}

impl RecordedRequest {
    /// Decodes the body as JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        self.body
            .as_ref()
            .and_then(|b| serde_json::from_slice(b).ok())
    }

    /// Returns the URL path without scheme, host or query.
    pub fn path(&self) -> String {
        url::Url::parse(&self.url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| self.url.clone())
    }
}

/// A canned response, or a transport failure to simulate.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// An HTTP response.
    Http {
        /// HTTP status code.
        status: u16,
        /// Response headers.
        headers: HashMap<String, String>,
        /// Response body.
        body: Bytes,
    },
    /// The request never got a response.
    Timeout,
}

impl MockResponse {
    /// Creates a successful JSON response.
    pub fn json(body: serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        MockResponse::Http {
            status: 200,
            headers,
            body: Bytes::from(body.to_string()),
        }
    }

    /// Creates an error response in the provider's error format.
    pub fn error(status: u16, message: &str) -> Self {
        MockResponse::Http {
            status,
            headers: HashMap::new(),
            body: Bytes::from(
                serde_json::json!({ "error": { "message": message } }).to_string(),
            ),
        }
    }
}

/// Mock transport that replays queued responses and records every request.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a response to the queue.
    pub fn enqueue_response(&self, response: MockResponse) {
        self.lock_responses().push_back(response);
    }

    /// Gets all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.lock_requests().clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.lock_requests().last().cloned()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        self.lock_requests().len()
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<MockResponse>> {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<RecordedRequest>> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(
        &self,
        method: Method,
        url: String,
        headers: HashMap<String, String>,
        body: Option<Bytes>,
    ) -> EspResult<HttpResponse> {
        self.lock_requests().push(RecordedRequest {
            method,
            url,
            headers,
            body,
        });

        let response = self
            .lock_responses()
            .pop_front()
            .unwrap_or_else(|| MockResponse::error(500, "No mock response configured"));

        match response {
            MockResponse::Timeout => Err(EspError::Timeout {
                message: "mock request timed out".to_string(),
                source: None,
            }),
            MockResponse::Http {
                status,
                headers,
                body,
            } => {
                if status >= 400 {
                    return Err(EspError::from_response(status, &headers, &body));
                }
                Ok(HttpResponse {
                    status,
                    headers,
                    body,
                })
            }
        }
    }
}
