//! Webhooks service.

use async_trait::async_trait;

use super::{encode_segment, require_id, ApiContext};
use crate::errors::{EspError, EspResult};
use crate::types::common::ListResponse;
use crate::types::webhooks::{CreateWebhookRequest, Webhook};

/// Webhooks service trait.
#[async_trait]
pub trait WebhooksService: Send + Sync {
    /// Creates a webhook.
    async fn create(&self, request: CreateWebhookRequest) -> EspResult<Webhook>;

    /// Lists webhooks.
    async fn list(&self) -> EspResult<ListResponse<Webhook>>;

    /// Retrieves a webhook by ID.
    async fn get(&self, id: &str) -> EspResult<Webhook>;
}

/// Default implementation of the webhooks service.
pub struct DefaultWebhooksService {
    ctx: ApiContext,
}

impl DefaultWebhooksService {
    /// Creates a new webhooks service.
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl WebhooksService for DefaultWebhooksService {
    async fn create(&self, request: CreateWebhookRequest) -> EspResult<Webhook> {
        if request.events.is_empty() {
            return Err(EspError::validation("A webhook needs at least one event"));
        }
        url::Url::parse(&request.url)
            .map_err(|e| EspError::validation(format!("Invalid webhook URL: {}", e)))?;

        self.ctx.post("/webhooks", &request).await
    }

    async fn list(&self) -> EspResult<ListResponse<Webhook>> {
        self.ctx.get("/webhooks").await
    }

    async fn get(&self, id: &str) -> EspResult<Webhook> {
        require_id("Webhook ID", id)?;
        self.ctx
            .get(&format!("/webhooks/{}", encode_segment(id)))
            .await
    }
}
