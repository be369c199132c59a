//! Stateless chat service
//!
//! Each call is independent: no session id, no history.

use crate::api::ChatApi;
use crate::error::Result;
use crate::models::ChatResponse;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ChatService {
    api: Arc<dyn ChatApi>,
}

impl ChatService {
    pub fn new(api: Arc<dyn ChatApi>) -> Self {
        Self { api }
    }

    /// Send one message and return the bot reply
    pub async fn send_chat_message(&self, message: &str) -> Result<ChatResponse> {
        tracing::debug!(len = message.len(), "Sending simple chat message");
        self.api.send_chat_message(message).await
    }
}
