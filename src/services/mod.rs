//! Service implementations for the ESP API.
//!
//! Each resource gets a trait and a `Default*Service` implementation. All of
//! them share an [`ApiContext`], which owns URL building, authentication
//! headers and JSON (de)serialization.

pub mod domains;
pub mod emails;
pub mod ip_pools;
pub mod ips;
pub mod messages;
pub mod stats;
pub mod subaccounts;
pub mod webhooks;

pub use domains::{DefaultDomainsService, DomainsService};
pub use emails::{DefaultEmailsService, EmailsService};
pub use ip_pools::{DefaultIpPoolsService, IpPoolsService};
pub use ips::{DefaultIpsService, IpsService};
pub use messages::{DefaultMessagesService, MessagesService};
pub use stats::{DefaultStatsService, StatsService};
pub use subaccounts::{DefaultSubaccountsService, SubaccountsService};
pub use webhooks::{DefaultWebhooksService, WebhooksService};

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::EspConfig;
use crate::errors::{EspError, EspResult};
use crate::transport::{HttpTransport, Method};

/// Everything a service needs to issue an authenticated request.
#[derive(Clone)]
pub struct ApiContext {
    config: Arc<EspConfig>,
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthManager>,
}

impl ApiContext {
    /// Creates a new context.
    pub fn new(
        config: Arc<EspConfig>,
        transport: Arc<dyn HttpTransport>,
        auth: Arc<dyn AuthManager>,
    ) -> Self {
        Self {
            config,
            transport,
            auth,
        }
    }

    /// Issues a GET request and decodes the JSON response.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> EspResult<R> {
        self.send(Method::Get, path, &[], None).await
    }

    /// Issues a GET request with query parameters.
    pub async fn get_with_query<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> EspResult<R> {
        self.send(Method::Get, path, query, None).await
    }

    /// Issues a POST request with a JSON body.
    pub async fn post<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> EspResult<R> {
        let body = serde_json::to_vec(body)?;
        self.send(Method::Post, path, &[], Some(Bytes::from(body)))
            .await
    }

    async fn send<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Bytes>,
    ) -> EspResult<R> {
        let url = build_url(&self.config.endpoint_url(path), query)?;
        let response = self
            .transport
            .execute(method, url, self.auth.get_headers(), body)
            .await?;

        serde_json::from_slice(&response.body)
            .map_err(|e| EspError::deserialization(e, &response.body))
    }
}

/// Appends query parameters to an endpoint URL.
fn build_url(endpoint: &str, query: &[(String, String)]) -> EspResult<String> {
    let mut url = url::Url::parse(endpoint)?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url.to_string())
}

/// Percent-encodes a caller-supplied value for use as one path segment.
pub(crate) fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Rejects identifiers that would not stay inside their endpoint: empty ones
/// turn into a list call, and dot segments (`.`, `..`) are collapsed by URL
/// normalisation.
pub(crate) fn require_id(kind: &str, id: &str) -> EspResult<()> {
    if id.trim().is_empty() {
        return Err(EspError::validation(format!("{} cannot be empty", kind)));
    }
    if id == "." || id == ".." {
        return Err(EspError::validation(format!("{} cannot be {:?}", kind, id)));
    }
    Ok(())
}
