//! Sending domains service.

use async_trait::async_trait;

use super::{encode_segment, require_id, ApiContext};
use crate::errors::{EspError, EspResult};
use crate::types::common::ListResponse;
use crate::types::domains::{AddDomainRequest, Domain};

/// Domains service trait.
#[async_trait]
pub trait DomainsService: Send + Sync {
    /// Adds a sending domain.
    async fn add(&self, request: AddDomainRequest) -> EspResult<Domain>;

    /// Lists sending domains.
    async fn list(&self) -> EspResult<ListResponse<Domain>>;

    /// Retrieves a domain, including its DNS records.
    async fn get(&self, domain: &str) -> EspResult<Domain>;
}

/// Default implementation of the domains service.
pub struct DefaultDomainsService {
    ctx: ApiContext,
}

impl DefaultDomainsService {
    /// Creates a new domains service.
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl DomainsService for DefaultDomainsService {
    async fn add(&self, request: AddDomainRequest) -> EspResult<Domain> {
        let name = request.domain.trim();
        if name.is_empty() || !name.contains('.') || name.contains(char::is_whitespace) {
            return Err(EspError::validation(format!(
                "Invalid domain name: {:?}",
                request.domain
            )));
        }

        self.ctx.post("/domains", &request).await
    }

    async fn list(&self) -> EspResult<ListResponse<Domain>> {
        self.ctx.get("/domains").await
    }

    async fn get(&self, domain: &str) -> EspResult<Domain> {
        require_id("Domain", domain)?;
        self.ctx
            .get(&format!("/domains/{}", encode_segment(domain)))
            .await
    }
}
