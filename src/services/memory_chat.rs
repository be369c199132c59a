//! Memory chat service
//!
//! Single source of truth for which conversation is active. The session
//! list and the message history are [`Resource`]s: the list loads on
//! construction and on explicit reload, the history follows
//! `selected_chat_id` and stays idle (no request) while nothing is selected.

use crate::api::ChatApi;
use crate::error::{ChatfrontError, Result};
use crate::models::{Chat, ChatMessage, ChatStartResponse};
use crate::reactive::{Resource, ResourceErrorHandler, RetryPolicy, Signal};
use futures::FutureExt;
use std::sync::Arc;

/// Session state and operations for memory chat
#[derive(Debug, Clone)]
pub struct MemoryChatService {
    api: Arc<dyn ChatApi>,
    selected_chat_id: Signal<Option<String>>,
    chats: Resource<(), Vec<Chat>>,
    chat_messages: Resource<String, Vec<ChatMessage>>,
}

impl MemoryChatService {
    /// Create the service and start loading the session list
    ///
    /// Must be called within a Tokio runtime.
    pub fn new(api: Arc<dyn ChatApi>, retry: RetryPolicy) -> Self {
        let selected_chat_id: Signal<Option<String>> = Signal::new(None);
        selected_chat_id.on_change(|id| {
            tracing::info!(chat_id = ?id, "Selected chat ID changed");
        });

        let list_api = Arc::clone(&api);
        let chats = Resource::eager("chats", move || {
            let api = Arc::clone(&list_api);
            async move { api.list_chats().await }.boxed()
        })
        .with_error_handler(ResourceErrorHandler::new("chats", retry))
        .start();

        let history_api = Arc::clone(&api);
        let chat_messages = Resource::keyed("chat messages", move |chat_id: String| {
            let api = Arc::clone(&history_api);
            async move { api.chat_history(&chat_id).await }.boxed()
        });
        chat_messages.bind(&selected_chat_id);

        Self {
            api,
            selected_chat_id,
            chats,
            chat_messages,
        }
    }

    /// Currently selected session, `None` when the next send starts a new one
    pub fn selected_chat_id(&self) -> Option<String> {
        self.selected_chat_id.get()
    }

    pub fn selected_chat_id_signal(&self) -> &Signal<Option<String>> {
        &self.selected_chat_id
    }

    /// Session list resource
    pub fn chats(&self) -> &Resource<(), Vec<Chat>> {
        &self.chats
    }

    /// Message history of the selected session
    pub fn chat_messages(&self) -> &Resource<String, Vec<ChatMessage>> {
        &self.chat_messages
    }

    /// Make `chat_id` the active session; its history is fetched
    ///
    /// A blank id clears the selection instead.
    pub fn select_chat(&self, chat_id: &str) {
        let chat_id = chat_id.trim();
        if chat_id.is_empty() {
            tracing::warn!("Ignoring selection of an empty chat id");
            self.clear_selection();
            return;
        }
        self.selected_chat_id.set(Some(chat_id.to_string()));
    }

    /// Deselect; the history resource goes idle
    pub fn clear_selection(&self) {
        self.selected_chat_id.set(None);
    }

    /// Start a session with its first message
    ///
    /// Selecting the returned id and reloading the list is up to the caller.
    pub async fn start_new_chat(&self, message: &str) -> Result<ChatStartResponse> {
        tracing::debug!("Starting new chat");
        self.api.start_chat(message).await
    }

    /// Send the next message of session `chat_id`
    ///
    /// # Errors
    ///
    /// [`ChatfrontError::NoActiveChat`] for a blank id; transport and HTTP
    /// errors are returned as-is.
    pub async fn continue_chat(&self, chat_id: &str, message: &str) -> Result<ChatMessage> {
        if chat_id.trim().is_empty() {
            return Err(ChatfrontError::NoActiveChat.into());
        }
        tracing::debug!(chat_id = %chat_id, "Continuing chat");
        self.api.continue_chat(chat_id, message).await
    }

    /// Continue whichever session is selected
    ///
    /// # Errors
    ///
    /// [`ChatfrontError::NoActiveChat`] when nothing is selected.
    pub async fn send_to_selected(&self, message: &str) -> Result<ChatMessage> {
        let chat_id = self
            .selected_chat_id()
            .ok_or(ChatfrontError::NoActiveChat)?;
        self.continue_chat(&chat_id, message).await
    }

    /// One-shot history fetch, bypassing the resource
    pub async fn get_chat_history(&self, chat_id: &str) -> Result<Vec<ChatMessage>> {
        self.api.chat_history(chat_id).await
    }

    /// One-shot session list fetch, bypassing the resource
    pub async fn get_all_chats(&self) -> Result<Vec<Chat>> {
        self.api.list_chats().await
    }

    /// Create an empty session on the server
    pub async fn create_chat(&self) -> Result<Chat> {
        self.api.create_chat().await
    }
}
