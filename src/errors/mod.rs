//! Error types for the ESP client.
//!
//! Every failed call surfaces as an [`EspError`]. Responses the provider
//! rejected (any HTTP status of 400 or above) become [`EspError::Api`] and
//! keep the status code and raw body; everything else (timeouts, refused
//! connections, malformed JSON, invalid local input) gets its own variant.

use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for ESP operations.
pub type EspResult<T> = Result<T, EspError>;

/// Error type for ESP client operations.
#[derive(Debug, Error)]
pub enum EspError {
    /// Configuration error (missing API key, invalid base URL, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// A request object failed local validation before being sent.
    #[error("Validation error: {message}")]
    Validation {
        /// Error message describing the validation issue.
        message: String,
    },

    /// The provider answered with a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the body, or a generic one.
        message: String,
        /// Provider error code, when present.
        code: Option<String>,
        /// Raw response body.
        body: String,
        /// Request ID for support tickets.
        request_id: Option<String>,
    },

    /// Request timeout.
    #[error("Request timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Underlying HTTP client error.
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Network/connection error.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
        /// Underlying HTTP client error.
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Request serialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },

    /// Response deserialization error.
    #[error("Failed to decode response: {message}")]
    Deserialization {
        /// Error message.
        message: String,
        /// The body that could not be decoded.
        body: String,
    },
}

impl EspError {
    /// Builds an [`EspError::Api`] from a failed HTTP response.
    pub fn from_response(status: u16, headers: &HashMap<String, String>, body: &[u8]) -> Self {
        let raw = String::from_utf8_lossy(body).to_string();
        let parsed: Option<ApiErrorResponse> = serde_json::from_slice(body).ok();

        let (message, code) = match parsed {
            Some(ApiErrorResponse::Nested { error }) => (Some(error.message), error.code),
            Some(ApiErrorResponse::Flat { message, code }) => (Some(message), code),
            None => (None, None),
        };

        let request_id = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("x-request-id"))
            .map(|(_, v)| v.clone());

        EspError::Api {
            status,
            message: message.unwrap_or_else(|| format!("HTTP {} error", status)),
            code,
            body: raw,
            request_id,
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        EspError::Validation {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        EspError::Configuration {
            message: message.into(),
        }
    }

    /// Creates a deserialization error for a response body.
    pub fn deserialization(err: serde_json::Error, body: &[u8]) -> Self {
        EspError::Deserialization {
            message: err.to_string(),
            body: String::from_utf8_lossy(body).to_string(),
        }
    }

    /// Returns the HTTP status if the provider rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            EspError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            EspError::Api { body, .. } | EspError::Deserialization { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns true for errors reported by the provider.
    pub fn is_api_error(&self) -> bool {
        matches!(self, EspError::Api { .. })
    }

    /// Returns true if the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns true if the API key was rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Messages of the underlying errors, outermost first.
    pub fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            causes.push(cause.to_string());
            current = std::error::Error::source(cause);
        }
        causes
    }

    /// This error's message followed by each cause, joined with `": "`.
    pub fn with_causes(&self) -> String {
        std::iter::once(self.to_string())
            .chain(self.causes())
            .collect::<Vec<_>>()
            .join(": ")
    }
}

/// Error bodies returned by the provider.
///
/// Most endpoints wrap the error in an `error` object; a few older ones
/// return the message at the top level.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum ApiErrorResponse {
    /// `{"error": {"message": "...", "code": "..."}}`
    Nested {
        /// The error details.
        error: ApiErrorDetail,
    },
    /// `{"message": "...", "code": "..."}`
    Flat {
        /// The error message.
        message: String,
        /// The error code.
        #[serde(default)]
        code: Option<String>,
    },
}

/// Detailed API error information.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorDetail {
    /// The error message.
    pub message: String,
    /// The error code.
    #[serde(default)]
    pub code: Option<String>,
}

impl From<reqwest::Error> for EspError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EspError::Timeout {
                message: err.to_string(),
                source: Some(err),
            }
        } else {
            EspError::Connection {
                message: err.to_string(),
                source: Some(err),
            }
        }
    }
}

impl From<serde_json::Error> for EspError {
    fn from(err: serde_json::Error) -> Self {
        EspError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for EspError {
    fn from(err: url::ParseError) -> Self {
        EspError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}
