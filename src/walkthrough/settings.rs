//! Walkthrough settings.
//!
//! Every value can come from the environment. Unset values fall back to
//! placeholders so the walkthrough always starts; the provider then rejects
//! the placeholder credentials and each step reports the API error.

use std::time::Duration;

use crate::config::DEFAULT_BASE_URL;

/// Placeholder used when `ESP_ACCOUNT_API_KEY` is unset.
pub const PLACEHOLDER_ACCOUNT_KEY: &str = "YOUR_ACCOUNT_API_KEY";

/// Placeholder used when `ESP_SUBACCOUNT_API_KEY` is unset.
pub const PLACEHOLDER_SUBACCOUNT_KEY: &str = "YOUR_SUBACCOUNT_API_KEY";

const DEFAULT_SENDER: &str = "sender@example.com";
const DEFAULT_RECIPIENT: &str = "recipient@example.com";
const DEFAULT_WEBHOOK_URL: &str = "https://example.com/webhooks/esp";
const DEFAULT_DOMAIN: &str = "mail.example.com";
const DEFAULT_LOOKUP_DELAY: Duration = Duration::from_secs(5);
const DEFAULT_STATS_DAYS: u32 = 7;

/// Inputs for one walkthrough run.
#[derive(Clone)]
pub struct WalkthroughSettings {
    /// API base URL.
    pub base_url: String,
    /// Account-level API key.
    pub account_api_key: String,
    /// Sub-account-level API key, used until a sub-account is created.
    pub subaccount_api_key: String,
    /// Sender address for both test emails.
    pub sender: String,
    /// Recipient address for both test emails.
    pub recipient: String,
    /// Target URL for the webhook.
    pub webhook_url: String,
    /// Domain to register.
    pub domain: String,
    /// Pause before looking up the sent message.
    pub lookup_delay: Duration,
    /// Length of the statistics window in days.
    pub stats_days: u32,
}

impl Default for WalkthroughSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            account_api_key: PLACEHOLDER_ACCOUNT_KEY.to_string(),
            subaccount_api_key: PLACEHOLDER_SUBACCOUNT_KEY.to_string(),
            sender: DEFAULT_SENDER.to_string(),
            recipient: DEFAULT_RECIPIENT.to_string(),
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
            lookup_delay: DEFAULT_LOOKUP_DELAY,
            stats_days: DEFAULT_STATS_DAYS,
        }
    }
}

impl WalkthroughSettings {
    /// Reads settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `ESP_ACCOUNT_API_KEY`, `ESP_SUBACCOUNT_API_KEY`
    /// - `ESP_BASE_URL`
    /// - `ESP_SENDER_EMAIL`, `ESP_RECIPIENT_EMAIL`
    /// - `ESP_WEBHOOK_URL`, `ESP_DOMAIN`
    /// - `ESP_LOOKUP_DELAY_SECS`, `ESP_STATS_DAYS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let lookup_delay = lookup("ESP_LOOKUP_DELAY_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.lookup_delay);

        let stats_days = lookup("ESP_STATS_DAYS")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|d| *d > 0)
            .unwrap_or(defaults.stats_days);

        Self {
            base_url: text("ESP_BASE_URL", defaults.base_url),
            account_api_key: text("ESP_ACCOUNT_API_KEY", defaults.account_api_key),
            subaccount_api_key: text("ESP_SUBACCOUNT_API_KEY", defaults.subaccount_api_key),
            sender: text("ESP_SENDER_EMAIL", defaults.sender),
            recipient: text("ESP_RECIPIENT_EMAIL", defaults.recipient),
            webhook_url: text("ESP_WEBHOOK_URL", defaults.webhook_url),
            domain: text("ESP_DOMAIN", defaults.domain),
            lookup_delay,
            stats_days,
        }
    }

    /// Warning to show before a run that will send placeholder keys.
    pub fn placeholder_warning(&self) -> Option<String> {
        let missing: Vec<&str> = [
            (self.account_api_key == PLACEHOLDER_ACCOUNT_KEY).then_some("ESP_ACCOUNT_API_KEY"),
            (self.subaccount_api_key == PLACEHOLDER_SUBACCOUNT_KEY)
                .then_some("ESP_SUBACCOUNT_API_KEY"),
        ]
        .into_iter()
        .flatten()
        .collect();

        if missing.is_empty() {
            return None;
        }

        Some(format!(
            "{} not set; placeholder keys will be sent and the provider will reject them",
            missing.join(" and ")
        ))
    }
}

impl std::fmt::Debug for WalkthroughSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkthroughSettings")
            .field("base_url", &self.base_url)
            .field("account_api_key", &"[REDACTED]")
            .field("subaccount_api_key", &"[REDACTED]")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .field("webhook_url", &self.webhook_url)
            .field("domain", &self.domain)
            .field("lookup_delay", &self.lookup_delay)
            .field("stats_days", &self.stats_days)
            .finish()
    }
}
