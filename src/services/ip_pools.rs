//! IP pools service.

use async_trait::async_trait;

use super::{encode_segment, require_id, ApiContext};
use crate::errors::{EspError, EspResult};
use crate::types::common::ListResponse;
use crate::types::ips::{CreateIpPoolRequest, IpPool};

/// Pool names are limited to this many characters.
pub const MAX_POOL_NAME_LEN: usize = 64;

/// IP pools service trait.
#[async_trait]
pub trait IpPoolsService: Send + Sync {
    /// Lists IP pools.
    async fn list(&self) -> EspResult<ListResponse<IpPool>>;

    /// Creates an IP pool.
    async fn create(&self, request: CreateIpPoolRequest) -> EspResult<IpPool>;

    /// Retrieves an IP pool by name.
    async fn get(&self, name: &str) -> EspResult<IpPool>;
}

/// Default implementation of the IP pools service.
pub struct DefaultIpPoolsService {
    ctx: ApiContext,
}

impl DefaultIpPoolsService {
    /// Creates a new IP pools service.
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl IpPoolsService for DefaultIpPoolsService {
    async fn list(&self) -> EspResult<ListResponse<IpPool>> {
        self.ctx.get("/ip-pools").await
    }

    async fn create(&self, request: CreateIpPoolRequest) -> EspResult<IpPool> {
        require_id("IP pool name", &request.name)?;
        if request.name.chars().count() > MAX_POOL_NAME_LEN {
            return Err(EspError::validation(format!(
                "IP pool name exceeds {} characters",
                MAX_POOL_NAME_LEN
            )));
        }

        self.ctx.post("/ip-pools", &request).await
    }

    async fn get(&self, name: &str) -> EspResult<IpPool> {
        require_id("IP pool name", name)?;
        self.ctx
            .get(&format!("/ip-pools/{}", encode_segment(name)))
            .await
    }
}
