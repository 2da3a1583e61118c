//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{
    ChatClient, ChatCompletionRequest, ChatMessage, ClientError, ConnectionConfig, Message,
};
use crate::core::state::{ConnectionStatus, ViewState};

/// One adapter call, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Check,
    Fetch,
    Send(String),
}

/// A fake client that records every call and answers from canned results.
pub struct RecordingClient {
    connect_error: Option<String>,
    send_result: Result<String, ClientError>,
    conversation: Vec<Message>,
    calls: Mutex<Vec<Call>>,
    sent: Mutex<Vec<ChatCompletionRequest>>,
}

impl RecordingClient {
    pub fn replying(reply: &str) -> Self {
        Self {
            connect_error: None,
            send_result: Ok(reply.to_string()),
            conversation: Vec::new(),
            calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_connect(message: &str) -> Self {
        Self {
            connect_error: Some(message.to_string()),
            ..Self::replying("")
        }
    }

    pub fn failing_send(error: ClientError) -> Self {
        Self {
            send_result: Err(error),
            ..Self::replying("")
        }
    }

    pub fn with_conversation(mut self, conversation: Vec<Message>) -> Self {
        self.conversation = conversation;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Completion requests as they would have gone over the wire.
    pub fn sent_requests(&self) -> Vec<ChatCompletionRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for RecordingClient {
    fn name(&self) -> &str {
        "recording"
    }

    async fn check_connection(&self, _config: &ConnectionConfig) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(Call::Check);
        match &self.connect_error {
            Some(msg) => Err(ClientError::Connection(msg.clone())),
            None => Ok(()),
        }
    }

    async fn fetch_conversation(
        &self,
        _config: &ConnectionConfig,
        _agent_name: &str,
        _conversation_name: &str,
    ) -> Result<Vec<Message>, ClientError> {
        self.calls.lock().unwrap().push(Call::Fetch);
        Ok(self.conversation.clone())
    }

    async fn send_message(
        &self,
        _config: &ConnectionConfig,
        agent_name: &str,
        conversation_name: &str,
        text: &str,
    ) -> Result<String, ClientError> {
        self.calls.lock().unwrap().push(Call::Send(text.to_string()));
        self.sent.lock().unwrap().push(ChatCompletionRequest {
            model: agent_name.to_string(),
            messages: vec![ChatMessage::user(text)],
            user: conversation_name.to_string(),
        });
        self.send_result.clone()
    }
}

/// A fresh, disconnected session with the stock defaults and key `k1`.
pub fn test_state() -> ViewState {
    ViewState::new(
        "http://localhost:7437".to_string(),
        "k1".to_string(),
        "gpt4free".to_string(),
        "My Conversation".to_string(),
    )
}

pub fn connected_state() -> ViewState {
    let mut state = test_state();
    state.connection_status = ConnectionStatus::Connected;
    state
}
