//! Stateless chat panel
//!
//! Same send machine as the memory panel, but the conversation lives only
//! in this view-model and every request stands alone.

use crate::models::ChatResponse;
use crate::reactive::Signal;
use crate::services::ChatService;
use crate::validation::{self, sanitize_input};
use crate::views::{AutoScroll, PanelState, ScrollTarget, CHAT_APOLOGY};
use std::sync::Arc;

/// Opening bot message
pub const SIMPLE_CHAT_GREETING: &str = "Hello, how can I help you today?";

#[derive(Debug, Clone)]
pub struct SimpleChat {
    service: ChatService,
    messages: Signal<Vec<ChatResponse>>,
    user_input: Signal<String>,
    state: Signal<PanelState>,
    max_length: usize,
}

impl SimpleChat {
    pub fn new(service: ChatService, max_length: usize) -> Self {
        Self {
            service,
            messages: Signal::new(vec![ChatResponse::bot(SIMPLE_CHAT_GREETING)]),
            user_input: Signal::new(String::new()),
            state: Signal::new(PanelState::Idle),
            max_length,
        }
    }

    pub fn attach_scroll_target(&self, target: Arc<dyn ScrollTarget>) {
        let auto = AutoScroll::new(target);
        self.messages.on_change(move |_| auto.schedule());
    }

    pub fn messages(&self) -> Vec<ChatResponse> {
        self.messages.get()
    }

    pub fn messages_signal(&self) -> &Signal<Vec<ChatResponse>> {
        &self.messages
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

    pub fn validation_error(&self) -> Option<String> {
        self.user_input
            .with(|input| validation::validation_error(input, self.max_length))
    }

    pub fn can_send(&self) -> bool {
        let busy = self.is_loading();
        self.user_input
            .with(|input| validation::can_send(input, self.max_length, busy))
    }

    /// Send the current input; returns `false` if nothing was sent
    pub async fn send_message(&self) -> bool {
        if !self.can_send() {
            return false;
        }
        let message = sanitize_input(&self.user_input.get());
        self.user_input.set(String::new());
        if message.is_empty() {
            tracing::warn!("Input contained only markup, nothing to send");
            return false;
        }

        self.messages
            .update(|m| m.push(ChatResponse::user(message.clone())));
        self.state.set(PanelState::Sending);

        let reply = match self.service.send_chat_message(&message).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Failed to send chat message: {:#}", e);
                ChatResponse::bot(CHAT_APOLOGY)
            }
        };
        self.messages.update(|m| m.push(reply));
        self.state.set(PanelState::Idle);
        true
    }
}
