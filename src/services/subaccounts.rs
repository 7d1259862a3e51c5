//! Sub-accounts service.

use async_trait::async_trait;

use super::{encode_segment, require_id, ApiContext};
use crate::errors::EspResult;
use crate::types::common::{ListOptions, ListResponse};
use crate::types::subaccounts::{CreateSubaccountRequest, Subaccount};

/// Sub-accounts service trait. Requires an account-scoped key.
#[async_trait]
pub trait SubaccountsService: Send + Sync {
    /// Lists sub-accounts.
    async fn list(&self, options: ListOptions) -> EspResult<ListResponse<Subaccount>>;

    /// Creates a sub-account. The response carries its API key.
    async fn create(&self, request: CreateSubaccountRequest) -> EspResult<Subaccount>;

    /// Retrieves a sub-account by ID.
    async fn get(&self, id: &str) -> EspResult<Subaccount>;
}

/// Default implementation of the sub-accounts service.
pub struct DefaultSubaccountsService {
    ctx: ApiContext,
}

impl DefaultSubaccountsService {
    /// Creates a new sub-accounts service.
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl SubaccountsService for DefaultSubaccountsService {
    async fn list(&self, options: ListOptions) -> EspResult<ListResponse<Subaccount>> {
        self.ctx
            .get_with_query("/subaccounts", &options.to_query())
            .await
    }

    async fn create(&self, request: CreateSubaccountRequest) -> EspResult<Subaccount> {
        tracing::info!(name = %request.name, "Creating sub-account");
        self.ctx.post("/subaccounts", &request).await
    }

    async fn get(&self, id: &str) -> EspResult<Subaccount> {
        require_id("Sub-account ID", id)?;
        self.ctx
            .get(&format!("/subaccounts/{}", encode_segment(id)))
            .await
    }
}
