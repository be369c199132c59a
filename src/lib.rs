//! Chatfront - chat and flight reservation client library
//!
//! This library provides the client side of a chat backend: stateless chat,
//! multi-turn chat with server-side memory, and a flight reservation
//! concierge. State is held in small reactive primitives so view-models stay
//! consistent while requests are in flight.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `reactive`: Signals, keyed resources, and the retrying error handler
//! - `api`: The `ChatApi` transport seam and its HTTP implementation
//! - `models`: Wire data shapes
//! - `services`: Chat, memory chat, and flight reservation services
//! - `views`: View-models for each screen (panels, lists, auto-scroll)
//! - `validation`: Input length rules and sanitization
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli` / `commands`: Command-line interface and terminal loops
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use chatfront::{Config, HttpChatApi, MemoryChatService};
//! use chatfront::views::ChatPanel;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let api = Arc::new(HttpChatApi::new(&config.api)?);
//!     let service = MemoryChatService::new(api, config.retry.policy());
//!     let panel = ChatPanel::new(service, config.chat.max_message_length);
//!     panel.set_user_input("Hello");
//!     panel.send_message().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod reactive;
pub mod services;
pub mod validation;
pub mod views;

// Re-export commonly used types
pub use api::{ChatApi, HttpChatApi};
pub use config::Config;
pub use error::{ChatfrontError, Result};
pub use reactive::{Resource, ResourceErrorHandler, ResourceStatus, RetryPolicy, Signal};
pub use services::{ChatService, FlightReservationService, MemoryChatService};
