//! Dedicated IPs service.

use async_trait::async_trait;

use super::ApiContext;
use crate::errors::EspResult;
use crate::types::common::ListResponse;
use crate::types::ips::Ip;

/// Dedicated IPs service trait.
#[async_trait]
pub trait IpsService: Send + Sync {
    /// Lists the account's dedicated IPs.
    async fn list(&self) -> EspResult<ListResponse<Ip>>;
}

/// Default implementation of the dedicated IPs service.
pub struct DefaultIpsService {
    ctx: ApiContext,
}

impl DefaultIpsService {
    /// Creates a new IPs service.
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl IpsService for DefaultIpsService {
    async fn list(&self) -> EspResult<ListResponse<Ip>> {
        self.ctx.get("/ips").await
    }
}
