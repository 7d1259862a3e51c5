//! ESP API client.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{ApiKeyAuthManager, AuthManager, AuthScope};
use crate::config::EspConfig;
use crate::errors::{EspError, EspResult};
use crate::services::{
    ApiContext, DefaultDomainsService, DefaultEmailsService, DefaultIpPoolsService,
    DefaultIpsService, DefaultMessagesService, DefaultStatsService, DefaultSubaccountsService,
    DefaultWebhooksService, DomainsService, EmailsService, IpPoolsService, IpsService,
    MessagesService, StatsService, SubaccountsService, WebhooksService,
};
use crate::transport::{HttpTransport, ReqwestTransport, TransportConfig};

/// The main ESP client.
///
/// Cheap to clone: configuration, transport and auth are shared.
#[derive(Clone)]
pub struct EspClient {
    config: Arc<EspConfig>,
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthManager>,
}

impl EspClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: EspConfig) -> EspResult<Self> {
        let transport = Arc::new(ReqwestTransport::with_config(TransportConfig::from(&config))?);
        Self::with_transport(config, transport)
    }

    /// Creates a client that sends through the given transport.
    pub fn with_transport(config: EspConfig, transport: Arc<dyn HttpTransport>) -> EspResult<Self> {
        let auth = ApiKeyAuthManager::new(&config);
        auth.validate_api_key()
            .map_err(EspError::configuration)?;

        Ok(Self {
            config: Arc::new(config),
            transport,
            auth: Arc::new(auth),
        })
    }

    /// Creates a new client builder.
    pub fn builder() -> EspClientBuilder {
        EspClientBuilder::new()
    }

    /// Creates an account-scoped client from the environment.
    pub fn from_env() -> EspResult<Self> {
        Self::new(EspConfig::from_env()?)
    }

    /// Returns a client that shares this client's transport but
    /// authenticates with another key.
    pub fn with_credentials(&self, api_key: impl Into<String>, scope: AuthScope) -> EspResult<Self> {
        let config = self.config.with_credentials(api_key, scope)?;
        Self::with_transport(config, Arc::clone(&self.transport))
    }

    fn context(&self) -> ApiContext {
        ApiContext::new(
            Arc::clone(&self.config),
            Arc::clone(&self.transport),
            Arc::clone(&self.auth),
        )
    }

    /// Returns the sub-accounts service.
    pub fn subaccounts(&self) -> impl SubaccountsService {
        DefaultSubaccountsService::new(self.context())
    }

    /// Returns the webhooks service.
    pub fn webhooks(&self) -> impl WebhooksService {
        DefaultWebhooksService::new(self.context())
    }

    /// Returns the domains service.
    pub fn domains(&self) -> impl DomainsService {
        DefaultDomainsService::new(self.context())
    }

    /// Returns the emails service.
    pub fn emails(&self) -> impl EmailsService {
        DefaultEmailsService::new(self.context())
    }

    /// Returns the messages service.
    pub fn messages(&self) -> impl MessagesService {
        DefaultMessagesService::new(self.context())
    }

    /// Returns the statistics service.
    pub fn stats(&self) -> impl StatsService {
        DefaultStatsService::new(self.context())
    }

    /// Returns the dedicated IPs service.
    pub fn ips(&self) -> impl IpsService {
        DefaultIpsService::new(self.context())
    }

    /// Returns the IP pools service.
    pub fn ip_pools(&self) -> impl IpPoolsService {
        DefaultIpPoolsService::new(self.context())
    }

    /// Returns the scope of the key this client authenticates with.
    pub fn scope(&self) -> AuthScope {
        self.auth.scope()
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &EspConfig {
        &self.config
    }
}

impl std::fmt::Debug for EspClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EspClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for the ESP client.
#[derive(Default)]
pub struct EspClientBuilder {
    api_key: Option<String>,
    scope: AuthScope,
    base_url: Option<String>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl EspClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the scope of the API key.
    pub fn scope(mut self, scope: AuthScope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replaces the default reqwest transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client.
    pub fn build(self) -> EspResult<EspClient> {
        let api_key = self.api_key.or_else(|| std::env::var("ESP_API_KEY").ok());
        let api_key = api_key.ok_or_else(|| {
            EspError::configuration("API key not provided and ESP_API_KEY not set")
        })?;

        let mut config_builder = EspConfig::builder().api_key(api_key).auth_scope(self.scope);

        if let Some(base_url) = self.base_url {
            config_builder = config_builder.base_url(base_url);
        }

        if let Some(timeout) = self.timeout {
            config_builder = config_builder.timeout(timeout);
        }

        let config = config_builder.build()?;

        match self.transport {
            Some(transport) => EspClient::with_transport(config, transport),
            None => EspClient::new(config),
        }
    }
}
