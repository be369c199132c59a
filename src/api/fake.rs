//! In-process fake backend for unit tests
//!
//! [`FakeChatApi`] records every call and answers from scripted data.
//! Individual endpoints can be switched to fail with `500 Internal Server
//! Error`, and an optional delay makes in-flight states observable under a
//! paused Tokio clock.
//!
//! # Example
//!
//! ```ignore
//! let api = Arc::new(FakeChatApi::new());
//! api.set_chats(vec![Chat { id: "a".into(), description: "First".into() }]);
//! api.fail(Endpoint::ContinueChat);
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::ChatApi;
use crate::error::{ChatfrontError, Result};
use crate::models::{
    CancellationRequest, CancellationResponse, Chat, ChatMessage, ChatResponse,
    ChatStartResponse, ConciergeResponse, FlightReservation, ReservationStatus,
};

/// Endpoint selector for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    SendChatMessage,
    ListChats,
    CreateChat,
    StartChat,
    ChatHistory,
    ContinueChat,
    SendConciergeMessage,
    ListReservations,
    CancelReservation,
}

/// A recorded call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    SendChatMessage(String),
    ListChats,
    CreateChat,
    StartChat(String),
    ChatHistory(String),
    ContinueChat { chat_id: String, message: String },
    SendConciergeMessage(String),
    ListReservations,
    CancelReservation(CancellationRequest),
}

#[derive(Debug)]
struct Script {
    chats: Vec<Chat>,
    histories: HashMap<String, Vec<ChatMessage>>,
    start_response: ChatStartResponse,
    continue_reply: ChatMessage,
    chat_reply: ChatResponse,
    concierge_reply: ConciergeResponse,
    reservations: Vec<FlightReservation>,
    cancellation: CancellationResponse,
    failing: HashSet<Endpoint>,
    delay: Option<Duration>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            chats: Vec::new(),
            histories: HashMap::new(),
            start_response: ChatStartResponse {
                chat_id: "chat-1".to_string(),
                message: "Hi!".to_string(),
                description: "New chat".to_string(),
            },
            continue_reply: ChatMessage::assistant("Sure."),
            chat_reply: ChatResponse::bot("pong"),
            concierge_reply: ConciergeResponse {
                content: "Your booking is confirmed.".to_string(),
                requires_action: None,
                actions: None,
            },
            reservations: vec![sample_reservation("101", ReservationStatus::Confirmed)],
            cancellation: CancellationResponse {
                success: true,
                message: "Reservation cancelled".to_string(),
                cancellation_fee: Some(50.0),
            },
            failing: HashSet::new(),
            delay: None,
        }
    }
}

/// Build a reservation row for tests
pub fn sample_reservation(number: &str, status: ReservationStatus) -> FlightReservation {
    FlightReservation {
        number: number.to_string(),
        name: "John Doe".to_string(),
        date: "2025-09-10".to_string(),
        status,
        from: "LAX".to_string(),
        to: "SFO".to_string(),
        seat: "12A".to_string(),
        flight_class: "ECONOMY".to_string(),
    }
}

/// Scripted, recording [`ChatApi`] implementation
#[derive(Debug, Default)]
pub struct FakeChatApi {
    calls: Mutex<Vec<ApiCall>>,
    script: Mutex<Script>,
}

impl FakeChatApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_chats(&self, chats: Vec<Chat>) {
        self.script.lock().unwrap().chats = chats;
    }

    pub fn set_history(&self, chat_id: &str, messages: Vec<ChatMessage>) {
        self.script
            .lock()
            .unwrap()
            .histories
            .insert(chat_id.to_string(), messages);
    }

    pub fn set_start_response(&self, response: ChatStartResponse) {
        self.script.lock().unwrap().start_response = response;
    }

    pub fn set_continue_reply(&self, reply: ChatMessage) {
        self.script.lock().unwrap().continue_reply = reply;
    }

    pub fn set_chat_reply(&self, reply: ChatResponse) {
        self.script.lock().unwrap().chat_reply = reply;
    }

    pub fn set_concierge_reply(&self, reply: ConciergeResponse) {
        self.script.lock().unwrap().concierge_reply = reply;
    }

    pub fn set_reservations(&self, reservations: Vec<FlightReservation>) {
        self.script.lock().unwrap().reservations = reservations;
    }

    pub fn set_delay(&self, delay: Duration) {
        self.script.lock().unwrap().delay = Some(delay);
    }

    /// Make `endpoint` answer with 500 until [`FakeChatApi::recover`]
    pub fn fail(&self, endpoint: Endpoint) {
        self.script.lock().unwrap().failing.insert(endpoint);
    }

    pub fn recover(&self, endpoint: Endpoint) {
        self.script.lock().unwrap().failing.remove(&endpoint);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    async fn enter(&self, endpoint: Endpoint, call: ApiCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        let (delay, failing) = {
            let script = self.script.lock().unwrap();
            (script.delay, script.failing.contains(&endpoint))
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if failing {
            return Err(ChatfrontError::Http {
                status: 500,
                status_text: "Internal Server Error".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl ChatApi for FakeChatApi {
    async fn send_chat_message(&self, message: &str) -> Result<ChatResponse> {
        self.enter(
            Endpoint::SendChatMessage,
            ApiCall::SendChatMessage(message.to_string()),
        )
        .await?;
        Ok(self.script.lock().unwrap().chat_reply.clone())
    }

    async fn list_chats(&self) -> Result<Vec<Chat>> {
        self.enter(Endpoint::ListChats, ApiCall::ListChats).await?;
        Ok(self.script.lock().unwrap().chats.clone())
    }

    async fn create_chat(&self) -> Result<Chat> {
        self.enter(Endpoint::CreateChat, ApiCall::CreateChat).await?;
        let mut script = self.script.lock().unwrap();
        let chat = Chat {
            id: format!("chat-{}", script.chats.len() + 1),
            description: "New chat".to_string(),
        };
        script.chats.push(chat.clone());
        Ok(chat)
    }

    async fn start_chat(&self, message: &str) -> Result<ChatStartResponse> {
        self.enter(Endpoint::StartChat, ApiCall::StartChat(message.to_string()))
            .await?;
        let mut script = self.script.lock().unwrap();
        let response = script.start_response.clone();
        script.histories.insert(
            response.chat_id.clone(),
            vec![
                ChatMessage::user(message),
                ChatMessage::assistant(response.message.clone()),
            ],
        );
        script.chats.push(Chat {
            id: response.chat_id.clone(),
            description: response.description.clone(),
        });
        Ok(response)
    }

    async fn chat_history(&self, chat_id: &str) -> Result<Vec<ChatMessage>> {
        if chat_id.trim().is_empty() {
            return Err(ChatfrontError::NoActiveChat.into());
        }
        self.enter(Endpoint::ChatHistory, ApiCall::ChatHistory(chat_id.to_string()))
            .await?;
        Ok(self
            .script
            .lock()
            .unwrap()
            .histories
            .get(chat_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn continue_chat(&self, chat_id: &str, message: &str) -> Result<ChatMessage> {
        if chat_id.trim().is_empty() {
            return Err(ChatfrontError::NoActiveChat.into());
        }
        self.enter(
            Endpoint::ContinueChat,
            ApiCall::ContinueChat {
                chat_id: chat_id.to_string(),
                message: message.to_string(),
            },
        )
        .await?;
        Ok(self.script.lock().unwrap().continue_reply.clone())
    }

    async fn send_concierge_message(&self, message: &str) -> Result<ConciergeResponse> {
        self.enter(
            Endpoint::SendConciergeMessage,
            ApiCall::SendConciergeMessage(message.to_string()),
        )
        .await?;
        Ok(self.script.lock().unwrap().concierge_reply.clone())
    }

    async fn list_reservations(&self) -> Result<Vec<FlightReservation>> {
        self.enter(Endpoint::ListReservations, ApiCall::ListReservations)
            .await?;
        Ok(self.script.lock().unwrap().reservations.clone())
    }

    async fn cancel_reservation(
        &self,
        request: &CancellationRequest,
    ) -> Result<CancellationResponse> {
        self.enter(
            Endpoint::CancelReservation,
            ApiCall::CancelReservation(request.clone()),
        )
        .await?;
        Ok(self.script.lock().unwrap().cancellation.clone())
    }
}
