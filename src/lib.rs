//! ESP Client Library
//!
//! A Rust client for an email service provider's HTTP API: sub-accounts,
//! webhooks, sending domains, transactional and marketing sends, message
//! lookup, statistics, dedicated IPs and IP pools.
//!
//! Every request authenticates with one API key. Account keys travel in
//! `X-Api-Key`, sub-account keys in `X-Subaccount-Api-Key`; the header is
//! picked from the [`AuthScope`] the client was built with.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use integrations_esp::{EmailAddress, EspClient, SendEmailRequest};
//! use integrations_esp::services::EmailsService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EspClient::builder()
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let request = SendEmailRequest::builder()
//!         .from(EmailAddress::new("shop@example.com")?)
//!         .to(EmailAddress::new("customer@example.com")?)
//!         .subject("Hello")
//!         .text("Hello from Rust")
//!         .build()?;
//!
//!     let response = client.emails().send(request).await?;
//!     println!("{}", response.message_id);
//!     Ok(())
//! }
//! ```
//!
//! The `esp-walkthrough` binary exercises every service in turn; see
//! [`walkthrough`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod services;
pub mod transport;
pub mod types;
pub mod walkthrough;

// Re-exports for convenience
pub use auth::AuthScope;
pub use client::{EspClient, EspClientBuilder};
pub use config::EspConfig;
pub use errors::{EspError, EspResult};

// Type re-exports
pub use types::common::{EmailAddress, ListOptions, ListResponse};
pub use types::domains::{AddDomainRequest, Domain};
pub use types::emails::{EmailCategory, SendEmailRequest, SendEmailResponse};
pub use types::ips::{CreateIpPoolRequest, Ip, IpPool, RoutingStrategy};
pub use types::messages::MessageDetails;
pub use types::stats::{StatsQuery, StatsReport};
pub use types::subaccounts::{CreateSubaccountRequest, Subaccount};
pub use types::webhooks::{CreateWebhookRequest, Webhook, WebhookEvent};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
