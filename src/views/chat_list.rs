//! Session list view-model

use crate::models::Chat;
use crate::reactive::{ResourceStatus, RetryOutcome};
use crate::services::MemoryChatService;

/// Event passed to row actions nested inside a selectable row
///
/// Stopping propagation keeps the enclosing row from treating the action
/// as a selection.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChatListEvent {
    propagation_stopped: bool,
}

impl ChatListEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Lists sessions and drives selection through [`MemoryChatService`]
#[derive(Debug, Clone)]
pub struct ChatList {
    service: MemoryChatService,
}

impl ChatList {
    pub fn new(service: MemoryChatService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &MemoryChatService {
        &self.service
    }

    /// Sessions as last loaded (empty while loading or after an error)
    pub fn chats(&self) -> Vec<Chat> {
        self.service.chats().value().unwrap_or_default()
    }

    pub fn status(&self) -> ResourceStatus<Vec<Chat>> {
        self.service.chats().status()
    }

    pub fn selected_chat_id(&self) -> Option<String> {
        self.service.selected_chat_id()
    }

    pub fn is_selected(&self, chat_id: &str) -> bool {
        self.service.selected_chat_id().as_deref() == Some(chat_id)
    }

    pub fn select_chat(&self, chat_id: &str) {
        self.service.select_chat(chat_id);
    }

    /// Deselect so the next send starts a fresh session
    pub fn create_new_chat(&self) {
        self.service.clear_selection();
    }

    /// Row delete action
    ///
    /// The backend has no delete endpoint, so this only stops the event
    /// from selecting the row.
    pub fn delete_chat(&self, chat_id: &str, event: &mut ChatListEvent) {
        event.stop_propagation();
        tracing::warn!(chat_id = %chat_id, "Deleting chats is not supported by the backend");
    }

    /// Error text for the list, if the last load failed
    pub fn error_message(&self) -> Option<String> {
        let handler = self.service.chats().error_handler()?;
        handler
            .status_message()
            .or_else(|| self.service.chats().error())
    }

    pub fn retry(&self) -> RetryOutcome {
        self.service
            .chats()
            .retry()
            .unwrap_or(RetryOutcome::Exhausted)
    }
}
