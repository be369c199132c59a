//! Wire and view data shapes
//!
//! Every type here serializes with the exact JSON field names the backend
//! uses, so the same structs are shared by the HTTP client and the
//! view-models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a message in a memory chat session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChatType {
    /// Typed by the user
    User,
    /// Produced by the assistant (including local apology notices)
    Assistant,
}

impl fmt::Display for ChatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatType::User => write!(f, "USER"),
            ChatType::Assistant => write!(f, "ASSISTANT"),
        }
    }
}

/// A single message in a session's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub content: String,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            chat_type: ChatType::User,
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            chat_type: ChatType::Assistant,
        }
    }
}

/// Summary of a server-side chat session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    /// Opaque id assigned by the backend
    pub id: String,
    pub description: String,
}

/// Response to `POST /api/chat-memory/start`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatStartResponse {
    pub chat_id: String,
    pub message: String,
    pub description: String,
}

/// Message shape used by the stateless simple chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    pub is_bot: bool,
}

impl ChatResponse {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_bot: false,
        }
    }

    pub fn bot(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_bot: true,
        }
    }
}

/// Request body `{message}` shared by every send endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

impl MessageRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A message in the concierge conversation, stamped on creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConciergeMessage {
    pub content: String,
    #[serde(rename = "type")]
    pub message_type: ChatType,
    pub timestamp: DateTime<Utc>,
}

impl ConciergeMessage {
    pub fn new(content: impl Into<String>, message_type: ChatType) -> Self {
        Self {
            content: content.into(),
            message_type,
            timestamp: Utc::now(),
        }
    }
}

/// Response to `POST /api/concierge`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConciergeResponse {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_action: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<String>>,
}

/// Booking status reported by the reservations endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStatus::Confirmed => write!(f, "CONFIRMED"),
            ReservationStatus::Pending => write!(f, "PENDING"),
            ReservationStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A flight booking row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightReservation {
    pub number: String,
    pub name: String,
    pub date: String,
    pub status: ReservationStatus,
    pub from: String,
    pub to: String,
    pub seat: String,
    #[serde(rename = "class")]
    pub flight_class: String,
}

/// Body of `POST /api/reservations/cancel`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationRequest {
    pub reservation_number: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Result of a cancellation attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_fee: Option<f64>,
}
