//! # View State
//!
//! Everything the UI shows, in one record. This module contains domain
//! logic only - no TUI-specific types. Presentation state (focus, cursor,
//! scroll offsets) lives in the `tui` module.
//!
//! ```text
//! ViewState
//! ├── user_input: String               // message being typed
//! ├── agent_response: String           // last reply text
//! ├── conversation_name: String        // remote conversation
//! ├── agent_name: String               // remote agent (sent as `model`)
//! ├── api_key: String                  // secret, never rendered in clear
//! ├── base_uri: String                 // server URL
//! ├── connection_status: ConnectionStatus
//! ├── conversation: Vec<Message>       // last fetched history
//! └── send_in_flight: bool             // a send is awaiting its reply
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! One instance per session, owned by whoever drives the session.

use std::fmt;

use crate::client::{ConnectionConfig, Message};
use crate::core::config::ResolvedConfig;

/// Where the session stands with the remote server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    NotConnected,
    Connected,
    /// Holds the human-readable text of the last failure.
    Error(String),
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::NotConnected => write!(f, "Not connected"),
            ConnectionStatus::Connected => write!(f, "Connected"),
            ConnectionStatus::Error(msg) => write!(f, "{msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub user_input: String,
    pub agent_response: String,
    pub conversation_name: String,
    pub agent_name: String,
    pub api_key: String,
    pub base_uri: String,
    pub connection_status: ConnectionStatus,
    pub conversation: Vec<Message>,
    /// True between a dispatched send and its result. Further sends are ignored.
    pub send_in_flight: bool,
}

impl ViewState {
    pub fn new(
        base_uri: String,
        api_key: String,
        agent_name: String,
        conversation_name: String,
    ) -> Self {
        Self {
            user_input: String::new(),
            agent_response: String::new(),
            conversation_name,
            agent_name,
            api_key,
            base_uri,
            connection_status: ConnectionStatus::NotConnected,
            conversation: Vec::new(),
            send_in_flight: false,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            config.base_uri.clone(),
            config.api_key.clone(),
            config.agent_name.clone(),
            config.conversation_name.clone(),
        )
    }

    /// Snapshot of the endpoint fields, taken per call.
    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig::new(self.base_uri.clone(), self.api_key.clone())
    }
}
