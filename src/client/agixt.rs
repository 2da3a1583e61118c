//! HTTP adapter for an AGiXT server.
//!
//! Endpoints used:
//! - `GET  /v1/models`           connection handshake
//! - `GET  /api/conversation`    stored conversation (JSON body selects it)
//! - `POST /v1/chat/completions` one user turn, non-streaming

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{RequestBuilder, StatusCode, Url};

use crate::client::{
    ChatClient, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ClientError,
    ConnectionConfig, ConversationQuery, ConversationResponse, Message,
};

/// A validated endpoint + credential pair, ready to issue requests.
///
/// Created fresh for every call from the caller's [`ConnectionConfig`].
struct Handle<'a> {
    base: String,
    authorization: Option<String>,
    http: &'a reqwest::Client,
}

impl<'a> Handle<'a> {
    fn new(http: &'a reqwest::Client, config: &ConnectionConfig) -> Result<Self, ClientError> {
        let trimmed = config.base_uri.trim().trim_end_matches('/');
        let url = Url::parse(trimmed)
            .map_err(|e| ClientError::Connection(format!("invalid base URI '{}': {e}", config.base_uri)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Connection(format!(
                "unsupported scheme '{}' in base URI",
                url.scheme()
            )));
        }

        Ok(Self {
            base: trimmed.to_string(),
            authorization: authorization_header(&config.api_key),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.authorization {
            Some(value) => builder.header(reqwest::header::AUTHORIZATION, value),
            None => builder,
        }
    }
}

/// `Bearer <key>` unless the key already carries the scheme; `None` for an empty key.
fn authorization_header(api_key: &str) -> Option<String> {
    let key = api_key.trim();
    if key.is_empty() {
        None
    } else if key.starts_with("Bearer ") {
        Some(key.to_string())
    } else {
        Some(format!("Bearer {key}"))
    }
}

/// Reads the body of a response, mapping transport and status failures.
async fn read_body(response: reqwest::Response) -> Result<String, ClientError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::Remote(e.to_string()))?;
    debug!("Raw response ({}): {}", status, body);

    if !status.is_success() {
        warn!("Remote API error: {} - {}", status.as_u16(), body);
        return Err(ClientError::Remote(format!("HTTP {}: {}", status.as_u16(), body)));
    }
    Ok(body)
}

/// Adapter for the AGiXT REST API.
pub struct AgixtClient {
    http: reqwest::Client,
}

impl Default for AgixtClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AgixtClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatClient for AgixtClient {
    fn name(&self) -> &str {
        "agixt"
    }

    async fn check_connection(&self, config: &ConnectionConfig) -> Result<(), ClientError> {
        let handle = Handle::new(&self.http, config)?;
        info!("Checking connection to {}", handle.base);

        let response = handle
            .authorize(handle.http.get(handle.url("/v1/models")))
            .send()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        let status = response.status();
        debug!("Handshake status: {}", status);
        match status {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!("Handshake rejected credential: {}", status);
                Err(ClientError::Connection(format!(
                    "authentication rejected (HTTP {})",
                    status.as_u16()
                )))
            }
            s => {
                let body = response.text().await.unwrap_or_default();
                warn!("Handshake failed: {} - {}", s.as_u16(), body);
                Err(ClientError::Connection(format!("HTTP {}: {}", s.as_u16(), body)))
            }
        }
    }

    async fn fetch_conversation(
        &self,
        config: &ConnectionConfig,
        agent_name: &str,
        conversation_name: &str,
    ) -> Result<Vec<Message>, ClientError> {
        let handle = Handle::new(&self.http, config)?;
        let query = ConversationQuery {
            agent_name,
            conversation_name,
        };

        info!(
            "Fetching conversation: agent={}, conversation={}",
            agent_name, conversation_name
        );

        let response = handle
            .authorize(handle.http.get(handle.url("/api/conversation")))
            .json(&query)
            .send()
            .await
            .map_err(|e| ClientError::Remote(e.to_string()))?;

        let body = read_body(response).await?;
        let parsed: ConversationResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::Remote(format!("malformed conversation: {e}")))?;

        debug!("Conversation has {} messages", parsed.conversation_history.len());
        Ok(parsed.conversation_history)
    }

    async fn send_message(
        &self,
        config: &ConnectionConfig,
        agent_name: &str,
        conversation_name: &str,
        text: &str,
    ) -> Result<String, ClientError> {
        // Sends only report remote failures, whatever went wrong.
        let handle = Handle::new(&self.http, config).map_err(|e| match e {
            ClientError::Connection(msg) | ClientError::Remote(msg) => ClientError::Remote(msg),
        })?;
        let request = ChatCompletionRequest {
            model: agent_name.to_string(),
            messages: vec![ChatMessage::user(text)],
            user: conversation_name.to_string(),
        };

        info!(
            "Chat completion request: model={}, user={}, len={}",
            request.model,
            request.user,
            text.len()
        );

        let response = handle
            .authorize(handle.http.post(handle.url("/v1/chat/completions")))
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Remote(e.to_string()))?;

        let body = read_body(response).await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::Remote(format!("malformed completion: {e}")))?;

        parsed
            .first_content()
            .ok_or_else(|| ClientError::Remote("response contained no choices".to_string()))
    }
}
