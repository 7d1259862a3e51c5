//! Email sending service.

use async_trait::async_trait;

use super::ApiContext;
use crate::errors::EspResult;
use crate::types::emails::{SendEmailRequest, SendEmailResponse};

/// Emails service trait. Requires a sub-account-scoped key.
#[async_trait]
pub trait EmailsService: Send + Sync {
    /// Sends a single email.
    async fn send(&self, request: SendEmailRequest) -> EspResult<SendEmailResponse>;
}

/// Default implementation of the emails service.
pub struct DefaultEmailsService {
    ctx: ApiContext,
}

impl DefaultEmailsService {
    /// Creates a new emails service.
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl EmailsService for DefaultEmailsService {
    async fn send(&self, request: SendEmailRequest) -> EspResult<SendEmailResponse> {
        tracing::debug!(
            category = ?request.category,
            recipients = request.to.len(),
            "Sending email"
        );

        let response: SendEmailResponse = self.ctx.post("/email/send", &request).await?;

        tracing::info!(message_id = %response.message_id, "Email accepted");
        Ok(response)
    }
}
