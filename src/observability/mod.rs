//! Observability module: structured logging.

pub mod logging;

pub use logging::{log_request, log_response, redact_sensitive, LogFormat, LogLevel, LoggingConfig};
