//! Message lookup service.

use async_trait::async_trait;

use super::{encode_segment, require_id, ApiContext};
use crate::errors::EspResult;
use crate::types::messages::MessageDetails;

/// Messages service trait.
#[async_trait]
pub trait MessagesService: Send + Sync {
    /// Retrieves a sent message and its delivery events.
    async fn get(&self, message_id: &str) -> EspResult<MessageDetails>;
}

/// Default implementation of the messages service.
pub struct DefaultMessagesService {
    ctx: ApiContext,
}

impl DefaultMessagesService {
    /// Creates a new messages service.
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl MessagesService for DefaultMessagesService {
    async fn get(&self, message_id: &str) -> EspResult<MessageDetails> {
        require_id("Message ID", message_id)?;
        self.ctx
            .get(&format!("/messages/{}", encode_segment(message_id)))
            .await
    }
}
