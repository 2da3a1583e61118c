use std::fmt;

use async_trait::async_trait;

use super::types::{ConnectionConfig, Message};

/// Errors surfaced by the remote client adapter.
///
/// Both variants end up as text in the connection status; neither is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Bad endpoint URL, unreachable host, or rejected credential.
    Connection(String),
    /// The service failed or rejected a fetch/send request.
    Remote(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Connection(msg) => write!(f, "Connection error: {msg}"),
            ClientError::Remote(msg) => write!(f, "API Error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// The three remote operations the chat session needs.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Returns the name of the adapter.
    fn name(&self) -> &str;

    /// Builds a client handle from `config` and performs the handshake.
    async fn check_connection(&self, config: &ConnectionConfig) -> Result<(), ClientError>;

    /// Fetches the full stored conversation. No paging, no caching.
    async fn fetch_conversation(
        &self,
        config: &ConnectionConfig,
        agent_name: &str,
        conversation_name: &str,
    ) -> Result<Vec<Message>, ClientError>;

    /// Sends a single user turn and returns the first choice's reply text.
    async fn send_message(
        &self,
        config: &ConnectionConfig,
        agent_name: &str,
        conversation_name: &str,
        text: &str,
    ) -> Result<String, ClientError>;
}
