//! JSON-over-HTTP implementation of [`ChatApi`]

use crate::api::{ChatApi, CHAT_MEMORY_PATH, CHAT_PATH, CONCIERGE_PATH, RESERVATIONS_PATH};
use crate::config::ApiConfig;
use crate::error::{ChatfrontError, Result};
use crate::models::{
    CancellationRequest, CancellationResponse, Chat, ChatMessage, ChatResponse,
    ChatStartResponse, ConciergeResponse, FlightReservation, MessageRequest,
};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// REST client for the chat backend
///
/// # Examples
///
/// ```
/// use chatfront::api::HttpChatApi;
/// use chatfront::config::ApiConfig;
///
/// let api = HttpChatApi::new(&ApiConfig::default()).unwrap();
/// assert_eq!(api.base_url().as_str(), "http://localhost:8080/");
/// ```
#[derive(Debug, Clone)]
pub struct HttpChatApi {
    client: Client,
    base_url: Url,
}

impl HttpChatApi {
    /// Create a client from API configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot
    /// be built
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ChatfrontError::Config(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ChatfrontError::Config(format!(
                "Base URL cannot carry paths: {}",
                config.base_url
            ))
            .into());
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ChatfrontError::Config(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized chat API client: base_url={}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve path segments against the base URL, percent-encoding each one
    fn endpoint(&self, root: &[&str], extra: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ChatfrontError::Config(format!("Base URL cannot carry paths: {}", self.base_url))
            })?;
            segments.pop_if_empty();
            segments.extend(root);
            segments.extend(extra);
        }
        Ok(url)
    }

    async fn get_json<R: DeserializeOwned>(&self, url: Url) -> Result<R> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;
        decode(url, response).await
    }

    async fn post_json<B, R>(&self, url: Url, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;
        decode(url, response).await
    }
}

fn transport_error(url: &Url, e: reqwest::Error) -> ChatfrontError {
    tracing::warn!("Request to {} failed: {}", url, e);
    if e.is_timeout() {
        ChatfrontError::Transport(format!("Request to {} timed out", url))
    } else {
        ChatfrontError::Transport(format!("Failed to reach {}: {}", url, e))
    }
}

async fn decode<R: DeserializeOwned>(url: Url, response: reqwest::Response) -> Result<R> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!("{} returned {}: {}", url, status, body);
        return Err(ChatfrontError::from_status(status).into());
    }

    response.json::<R>().await.map_err(|e| {
        tracing::error!("Failed to parse response from {}: {}", url, e);
        ChatfrontError::Transport(format!("Failed to parse response from {}: {}", url, e)).into()
    })
}

fn require_chat_id(chat_id: &str) -> Result<&str> {
    let trimmed = chat_id.trim();
    if trimmed.is_empty() {
        return Err(ChatfrontError::NoActiveChat.into());
    }
    Ok(trimmed)
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn send_chat_message(&self, message: &str) -> Result<ChatResponse> {
        let url = self.endpoint(CHAT_PATH, &[])?;
        self.post_json(url, &MessageRequest::new(message)).await
    }

    async fn list_chats(&self) -> Result<Vec<Chat>> {
        let url = self.endpoint(CHAT_MEMORY_PATH, &[])?;
        self.get_json(url).await
    }

    async fn create_chat(&self) -> Result<Chat> {
        let url = self.endpoint(CHAT_MEMORY_PATH, &[])?;
        self.post_json(url, &serde_json::json!({})).await
    }

    async fn start_chat(&self, message: &str) -> Result<ChatStartResponse> {
        let url = self.endpoint(CHAT_MEMORY_PATH, &["start"])?;
        self.post_json(url, &MessageRequest::new(message)).await
    }

    async fn chat_history(&self, chat_id: &str) -> Result<Vec<ChatMessage>> {
        let chat_id = require_chat_id(chat_id)?;
        let url = self.endpoint(CHAT_MEMORY_PATH, &[chat_id])?;
        self.get_json(url).await
    }

    async fn continue_chat(&self, chat_id: &str, message: &str) -> Result<ChatMessage> {
        let chat_id = require_chat_id(chat_id)?;
        let url = self.endpoint(CHAT_MEMORY_PATH, &[chat_id])?;
        self.post_json(url, &MessageRequest::new(message)).await
    }

    async fn send_concierge_message(&self, message: &str) -> Result<ConciergeResponse> {
        let url = self.endpoint(CONCIERGE_PATH, &[])?;
        self.post_json(url, &MessageRequest::new(message)).await
    }

    async fn list_reservations(&self) -> Result<Vec<FlightReservation>> {
        let url = self.endpoint(RESERVATIONS_PATH, &[])?;
        self.get_json(url).await
    }

    async fn cancel_reservation(
        &self,
        request: &CancellationRequest,
    ) -> Result<CancellationResponse> {
        let url = self.endpoint(RESERVATIONS_PATH, &["cancel"])?;
        self.post_json(url, request).await
    }
}
