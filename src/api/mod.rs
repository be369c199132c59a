//! Backend API abstraction and implementations
//!
//! The [`ChatApi`] trait covers every REST endpoint the client talks to.
//! Concrete implementations live in submodules:
//!
//! - [`http::HttpChatApi`] -- JSON over HTTP via `reqwest`.
//! - [`fake::FakeChatApi`] -- scripted in-process fake used in tests
//!   (cfg(test) only).
//!
//! Services hold an `Arc<dyn ChatApi>`, so view-models can be exercised
//! without a server.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    CancellationRequest, CancellationResponse, Chat, ChatMessage, ChatResponse,
    ChatStartResponse, ConciergeResponse, FlightReservation,
};

/// Simple chat endpoint
pub const CHAT_PATH: &[&str] = &["api", "chat"];
/// Memory chat endpoints root
pub const CHAT_MEMORY_PATH: &[&str] = &["api", "chat-memory"];
/// Concierge endpoint
pub const CONCIERGE_PATH: &[&str] = &["api", "concierge"];
/// Reservations endpoints root
pub const RESERVATIONS_PATH: &[&str] = &["api", "reservations"];

/// Client-side view of the backend REST API
///
/// Every failure is returned as an error; nothing here retries.
#[async_trait]
pub trait ChatApi: Send + Sync + std::fmt::Debug {
    /// `POST /api/chat` -- stateless single message
    async fn send_chat_message(&self, message: &str) -> Result<ChatResponse>;

    /// `GET /api/chat-memory` -- all sessions
    async fn list_chats(&self) -> Result<Vec<Chat>>;

    /// `POST /api/chat-memory` -- empty session
    async fn create_chat(&self) -> Result<Chat>;

    /// `POST /api/chat-memory/start` -- new session with its first message
    async fn start_chat(&self, message: &str) -> Result<ChatStartResponse>;

    /// `GET /api/chat-memory/{id}` -- session history
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ChatfrontError::NoActiveChat`] for an empty
    /// id without issuing a request.
    async fn chat_history(&self, chat_id: &str) -> Result<Vec<ChatMessage>>;

    /// `POST /api/chat-memory/{id}` -- next message in a session
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ChatfrontError::NoActiveChat`] for an empty
    /// id without issuing a request.
    async fn continue_chat(&self, chat_id: &str, message: &str) -> Result<ChatMessage>;

    /// `POST /api/concierge`
    async fn send_concierge_message(&self, message: &str) -> Result<ConciergeResponse>;

    /// `GET /api/reservations`
    async fn list_reservations(&self) -> Result<Vec<FlightReservation>>;

    /// `POST /api/reservations/cancel`
    async fn cancel_reservation(
        &self,
        request: &CancellationRequest,
    ) -> Result<CancellationResponse>;
}

pub mod http;

#[cfg(test)]
pub mod fake;

pub use http::HttpChatApi;
