//! Logging configuration and utilities.
//!
//! Structured logging via `tracing`, with the subscriber configured from a
//! [`LoggingConfig`] and the `RUST_LOG` environment variable.

use std::fmt;
use tracing_subscriber::{fmt as fmt_layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// The minimum log level to capture
    pub level: LogLevel,
    /// The output format for log messages
    pub format: LogFormat,
    /// Whether to include the module target in log output
    pub include_target: bool,
}

/// Log level enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace-level logging (most verbose)
    Trace,
    /// Debug-level logging
    Debug,
    /// Info-level logging
    Info,
    /// Warning-level logging
    Warn,
    /// Error-level logging (least verbose)
    Error,
}

impl From<LogLevel> for tracing::level_filters::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::level_filters::LevelFilter::TRACE,
            LogLevel::Debug => tracing::level_filters::LevelFilter::DEBUG,
            LogLevel::Info => tracing::level_filters::LevelFilter::INFO,
            LogLevel::Warn => tracing::level_filters::LevelFilter::WARN,
            LogLevel::Error => tracing::level_filters::LevelFilter::ERROR,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors
    Pretty,
    /// JSON format for log shippers
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            include_target: false,
        }
    }
}

impl LoggingConfig {
    /// Creates a new logging configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `ESP_LOG_LEVEL` and `ESP_LOG_FORMAT`, ignoring unknown values.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(level) = std::env::var("ESP_LOG_LEVEL")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.level = level;
        }

        if let Some(format) = std::env::var("ESP_LOG_FORMAT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.format = format;
        }

        config
    }

    /// Sets the log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the log format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets whether to include the module target.
    pub fn with_target(mut self, include: bool) -> Self {
        self.include_target = include;
        self
    }

    /// Initialize logging with this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber has already been installed.
    pub fn init(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let filter = EnvFilter::builder()
            .with_default_directive(tracing::level_filters::LevelFilter::from(self.level).into())
            .from_env_lossy();

        match self.format {
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt_layer::layer()
                            .with_writer(std::io::stderr)
                            .with_target(self.include_target),
                    )
                    .try_init()?;
            }
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer::layer().json().with_writer(std::io::stderr))
                    .try_init()?;
            }
            LogFormat::Compact => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer::layer().compact().with_writer(std::io::stderr))
                    .try_init()?;
            }
        }

        Ok(())
    }
}

/// Field names whose values never reach the logs.
pub const SENSITIVE_FIELDS: &[&str] = &["api_key", "apiKey", "password", "secret", "token"];

/// Replaces the values of sensitive JSON fields with `[REDACTED]`.
pub fn redact_sensitive(input: &str) -> String {
    let mut result = input.to_string();

    for field in SENSITIVE_FIELDS {
        let pattern = format!(r#""{}"\s*:\s*"[^"]*""#, regex::escape(field));
        if let Ok(re) = regex::Regex::new(&pattern) {
            result = re
                .replace_all(&result, format!(r#""{}":"[REDACTED]""#, field))
                .to_string();
        }
    }

    result
}

/// Log an outgoing HTTP request.
pub fn log_request(method: &str, url: &str, body: Option<&[u8]>) {
    let body = body
        .map(|b| redact_sensitive(&String::from_utf8_lossy(b)))
        .unwrap_or_else(|| "<empty>".to_string());

    tracing::debug!(method = method, url = url, body = %body, "Outgoing request");
}

/// Log an HTTP response.
pub fn log_response(status: u16, url: &str, body: &[u8]) {
    let body = redact_sensitive(&String::from_utf8_lossy(body));

    if status >= 400 {
        tracing::warn!(status = status, url = url, body = %body, "Request failed");
    } else {
        tracing::debug!(status = status, url = url, body = %body, "Response received");
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}
