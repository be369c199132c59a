//! Error types for Chatfront
//!
//! This module defines the error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Chatfront operations
///
/// Covers configuration loading, HTTP transport failures, input
/// validation, and misuse of the chat session state.
#[derive(Error, Debug)]
pub enum ChatfrontError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server answered with a non-success status
    #[error("HTTP error: {status} {status_text}")]
    Http {
        /// Numeric HTTP status code
        status: u16,
        /// Canonical reason phrase (or the response body when there is none)
        status_text: String,
    },

    /// Connection, timeout, or decoding failures below the HTTP status layer
    #[error("Transport error: {0}")]
    Transport(String),

    /// A message was sent to a session while no session is selected
    #[error("No active chat session is selected")]
    NoActiveChat,

    /// User input was rejected before any request was issued
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// URL parsing errors
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ChatfrontError {
    /// Build an HTTP error from a response status
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }
}

/// Result type alias for Chatfront operations
///
/// Uses `anyhow::Error` so callers can attach context while the concrete
/// [`ChatfrontError`] stays recoverable through `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;
