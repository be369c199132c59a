//! Memory chat panel: input, optimistic send, and reconciliation
//!
//! The panel is either `Idle` or `Sending`. A send appends the sanitized
//! user message to the shared history right away, then either starts a new
//! session (nothing selected) or continues the selected one. The user
//! message is never rolled back; a failed request only appends
//! [`CHAT_APOLOGY`] as an assistant message.

use crate::models::ChatMessage;
use crate::reactive::Signal;
use crate::services::MemoryChatService;
use crate::validation::{self, sanitize_input};
use crate::views::{AutoScroll, ScrollTarget, CHAT_APOLOGY};
use std::sync::Arc;

/// Histories this short just got their first exchange, so the server may
/// have assigned a new description.
const SHORT_HISTORY_LEN: usize = 2;

/// Send state of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Sending,
}

/// What a call to [`ChatPanel::send_message`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty, too long, or a send was already in flight
    Rejected,
    /// A new session was started and selected
    Started { chat_id: String },
    /// The selected session answered
    Replied,
    /// The request failed; the apology notice was appended
    Failed,
}

/// Holds a panel in `Sending`; dropping it (including when the send future
/// is cancelled) returns the panel to `Idle`.
struct SendingGuard<'a> {
    state: &'a Signal<PanelState>,
}

impl<'a> SendingGuard<'a> {
    /// Atomically move `Idle -> Sending`; `None` if a send is already in flight
    fn claim(state: &'a Signal<PanelState>) -> Option<Self> {
        let claimed = state.update_if(|current| match current {
            PanelState::Idle => {
                *current = PanelState::Sending;
                true
            }
            PanelState::Sending => false,
        });
        claimed.then_some(Self { state })
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.state.set(PanelState::Idle);
    }
}

/// View-model of the memory chat panel
#[derive(Debug, Clone)]
pub struct ChatPanel {
    service: MemoryChatService,
    user_input: Signal<String>,
    state: Signal<PanelState>,
    max_length: usize,
}

impl ChatPanel {
    pub fn new(service: MemoryChatService, max_length: usize) -> Self {
        Self {
            service,
            user_input: Signal::new(String::new()),
            state: Signal::new(PanelState::Idle),
            max_length,
        }
    }

    /// Scroll `target` to the bottom after every change of the message list
    pub fn attach_scroll_target(&self, target: Arc<dyn ScrollTarget>) {
        let auto = AutoScroll::new(target);
        self.service.chat_messages().on_change(move |_| auto.schedule());
    }

    pub fn service(&self) -> &MemoryChatService {
        &self.service
    }

    pub fn user_input(&self) -> String {
        self.user_input.get()
    }

    pub fn set_user_input(&self, input: impl Into<String>) {
        self.user_input.set(input.into());
    }

    pub fn state(&self) -> PanelState {
        self.state.get()
    }

    pub fn is_loading(&self) -> bool {
        self.state() == PanelState::Sending
    }

    /// Messages of the active session (empty when none are loaded)
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.service.chat_messages().value().unwrap_or_default()
    }

    pub fn validation_error(&self) -> Option<String> {
        self.user_input
            .with(|input| validation::validation_error(input, self.max_length))
    }

    pub fn can_send(&self) -> bool {
        let busy = self.is_loading();
        self.user_input
            .with(|input| validation::can_send(input, self.max_length, busy))
    }

    /// Send the current input
    ///
    /// Never fails: transport errors are turned into the apology notice and
    /// the panel always returns to `Idle`.
    pub async fn send_message(&self) -> SendOutcome {
        if !self.can_send() {
            return SendOutcome::Rejected;
        }
        let Some(_sending) = SendingGuard::claim(&self.state) else {
            return SendOutcome::Rejected;
        };

        let message = sanitize_input(&self.user_input.get());
        if message.is_empty() {
            tracing::warn!("Input contained only markup, nothing to send");
            self.user_input.set(String::new());
            return SendOutcome::Rejected;
        }

        self.append(ChatMessage::user(message.clone()));
        self.user_input.set(String::new());

        match self.service.selected_chat_id() {
            None => self.start_chat(&message).await,
            Some(chat_id) => self.continue_chat(&chat_id, &message).await,
        }
    }

    async fn start_chat(&self, message: &str) -> SendOutcome {
        match self.service.start_new_chat(message).await {
            Ok(response) => {
                tracing::info!(chat_id = %response.chat_id, "Started new chat");
                self.service.select_chat(&response.chat_id);
                self.service.chats().reload();
                SendOutcome::Started {
                    chat_id: response.chat_id,
                }
            }
            Err(e) => {
                tracing::error!("Failed to start chat: {:#}", e);
                self.append(ChatMessage::assistant(CHAT_APOLOGY));
                SendOutcome::Failed
            }
        }
    }

    async fn continue_chat(&self, chat_id: &str, message: &str) -> SendOutcome {
        let result = self.service.continue_chat(chat_id, message).await;

        // The user may have switched sessions while the request was in flight.
        if self.service.selected_chat_id().as_deref() != Some(chat_id) {
            tracing::debug!(chat_id = %chat_id, "Dropping reply for a session that is no longer selected");
            return match result {
                Ok(_) => SendOutcome::Replied,
                Err(_) => SendOutcome::Failed,
            };
        }

        match result {
            Ok(reply) => {
                self.append(ChatMessage::assistant(reply.content));
                if self.messages().len() <= SHORT_HISTORY_LEN {
                    self.service.chats().reload();
                }
                SendOutcome::Replied
            }
            Err(e) => {
                tracing::error!(chat_id = %chat_id, "Failed to continue chat: {:#}", e);
                self.append(ChatMessage::assistant(CHAT_APOLOGY));
                SendOutcome::Failed
            }
        }
    }

    fn append(&self, message: ChatMessage) {
        self.service.chat_messages().update(|current| {
            let mut messages = current.unwrap_or_default();
            messages.push(message);
            messages
        });
    }
}
