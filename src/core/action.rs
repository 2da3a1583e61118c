//! # Actions
//!
//! Everything that can happen in a chat session becomes an `Action`.
//! User presses Enter in the message field? That's `Action::Send`.
//! The server answers? That's `Action::SendFinished { text, result }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the remote call (if any)
//! that should happen next. No I/O here; `controller` performs effects.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::client::{ClientError, ConnectionConfig, Message};
use crate::core::state::{ConnectionStatus, ViewState};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    InputChanged(String),
    ApiKeyChanged(String),
    BaseUriChanged(String),
    Connect,
    ConnectFinished(Result<(), ClientError>),
    Send,
    /// `text` is what was sent, so a draft typed meanwhile survives the reply.
    SendFinished {
        text: String,
        result: Result<String, ClientError>,
    },
    RefreshConversation,
    ConversationLoaded(Result<Vec<Message>, ClientError>),
    Quit,
}

/// Parameters of a send, captured when the send is dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct SendRequest {
    pub config: ConnectionConfig,
    pub agent_name: String,
    pub conversation_name: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub config: ConnectionConfig,
    pub agent_name: String,
    pub conversation_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    CheckConnection(ConnectionConfig),
    SendMessage(SendRequest),
    FetchConversation(FetchRequest),
    Quit,
}

fn fetch_effect(state: &ViewState) -> Effect {
    Effect::FetchConversation(FetchRequest {
        config: state.connection_config(),
        agent_name: state.agent_name.clone(),
        conversation_name: state.conversation_name.clone(),
    })
}

fn record_failure(state: &mut ViewState, error: ClientError) {
    warn!("{}", error);
    state.connection_status = ConnectionStatus::Error(error.to_string());
}

pub fn update(state: &mut ViewState, action: Action) -> Effect {
    match action {
        Action::InputChanged(text) => {
            state.user_input = text;
            Effect::None
        }
        Action::ApiKeyChanged(text) => {
            state.api_key = text;
            Effect::None
        }
        Action::BaseUriChanged(text) => {
            state.base_uri = text;
            Effect::None
        }
        Action::Connect => {
            info!("Connecting to {}", state.base_uri);
            Effect::CheckConnection(state.connection_config())
        }
        Action::ConnectFinished(Ok(())) => {
            info!("Connected to {}", state.base_uri);
            state.connection_status = ConnectionStatus::Connected;
            fetch_effect(state)
        }
        Action::ConnectFinished(Err(e)) => {
            record_failure(state, e);
            Effect::None
        }
        Action::Send => {
            // Disconnected sends are dropped without telling the user.
            if !state.connection_status.is_connected() {
                debug!("Send ignored: {}", state.connection_status);
                return Effect::None;
            }
            if state.send_in_flight {
                debug!("Send ignored: previous send still in flight");
                return Effect::None;
            }
            state.send_in_flight = true;
            Effect::SendMessage(SendRequest {
                config: state.connection_config(),
                agent_name: state.agent_name.clone(),
                conversation_name: state.conversation_name.clone(),
                text: state.user_input.clone(),
            })
        }
        Action::SendFinished {
            text,
            result: Ok(reply),
        } => {
            state.send_in_flight = false;
            state.agent_response = reply;
            if state.user_input == text {
                state.user_input.clear();
            }
            fetch_effect(state)
        }
        Action::SendFinished { result: Err(e), .. } => {
            state.send_in_flight = false;
            record_failure(state, e);
            Effect::None
        }
        Action::RefreshConversation => {
            if state.connection_status.is_connected() {
                fetch_effect(state)
            } else {
                Effect::None
            }
        }
        Action::ConversationLoaded(Ok(messages)) => {
            debug!("Conversation loaded: {} messages", messages.len());
            state.conversation = messages;
            Effect::None
        }
        Action::ConversationLoaded(Err(e)) => {
            record_failure(state, e);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{connected_state, test_state};

    #[test]
    fn test_input_changes_update_fields() {
        let mut state = test_state();
        assert_eq!(update(&mut state, Action::InputChanged("hel".into())), Effect::None);
        assert_eq!(state.user_input, "hel");

        update(&mut state, Action::ApiKeyChanged("k2".into()));
        update(&mut state, Action::BaseUriChanged("http://other:1".into()));
        assert_eq!(state.api_key, "k2");
        assert_eq!(state.base_uri, "http://other:1");
    }

    #[test]
    fn test_config_change_keeps_status() {
        let mut state = connected_state();
        update(&mut state, Action::BaseUriChanged("http://other:1".into()));
        update(&mut state, Action::ApiKeyChanged("k2".into()));
        assert_eq!(state.connection_status, ConnectionStatus::Connected);
    }

    #[test]
    fn test_connect_requests_check_with_current_config() {
        let mut state = test_state();
        let effect = update(&mut state, Action::Connect);
        assert_eq!(
            effect,
            Effect::CheckConnection(ConnectionConfig::new("http://localhost:7437", "k1"))
        );
        // Status only changes once the check returns
        assert_eq!(state.connection_status, ConnectionStatus::NotConnected);
    }

    #[test]
    fn test_connect_success_sets_connected_and_fetches() {
        let mut state = test_state();
        let effect = update(&mut state, Action::ConnectFinished(Ok(())));
        assert_eq!(state.connection_status, ConnectionStatus::Connected);
        assert!(matches!(effect, Effect::FetchConversation(ref req)
            if req.agent_name == "gpt4free" && req.conversation_name == "My Conversation"));
    }

    #[test]
    fn test_connect_failure_sets_error() {
        let mut state = test_state();
        let effect = update(
            &mut state,
            Action::ConnectFinished(Err(ClientError::Connection("refused".into()))),
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(
            state.connection_status,
            ConnectionStatus::Error("Connection error: refused".into())
        );
    }

    #[test]
    fn test_send_while_disconnected_is_noop() {
        let mut state = test_state();
        state.user_input = "hello".to_string();
        let before = state.clone();

        assert_eq!(update(&mut state, Action::Send), Effect::None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_send_after_error_is_noop() {
        let mut state = test_state();
        state.connection_status = ConnectionStatus::Error("API Error: x".into());
        assert_eq!(update(&mut state, Action::Send), Effect::None);
        assert!(!state.send_in_flight);
    }

    #[test]
    fn test_send_when_connected_dispatches_request() {
        let mut state = connected_state();
        state.user_input = "hello".to_string();

        let effect = update(&mut state, Action::Send);
        assert_eq!(
            effect,
            Effect::SendMessage(SendRequest {
                config: ConnectionConfig::new("http://localhost:7437", "k1"),
                agent_name: "gpt4free".to_string(),
                conversation_name: "My Conversation".to_string(),
                text: "hello".to_string(),
            })
        );
        assert!(state.send_in_flight);
        // Input stays until the reply arrives
        assert_eq!(state.user_input, "hello");
    }

    #[test]
    fn test_second_send_while_in_flight_is_ignored() {
        let mut state = connected_state();
        state.user_input = "hello".to_string();
        assert!(matches!(update(&mut state, Action::Send), Effect::SendMessage(_)));
        assert_eq!(update(&mut state, Action::Send), Effect::None);
        assert!(state.send_in_flight);
    }

    #[test]
    fn test_send_success_sets_response_and_clears_input() {
        let mut state = connected_state();
        state.user_input = "hello".to_string();
        update(&mut state, Action::Send);

        let effect = update(
            &mut state,
            Action::SendFinished {
                text: "hello".into(),
                result: Ok("hi there".into()),
            },
        );
        assert_eq!(state.agent_response, "hi there");
        assert!(state.user_input.is_empty());
        assert!(!state.send_in_flight);
        assert!(matches!(effect, Effect::FetchConversation(_)));
    }

    #[test]
    fn test_reply_keeps_draft_typed_while_in_flight() {
        let mut state = connected_state();
        state.user_input = "hello".to_string();
        update(&mut state, Action::Send);
        update(&mut state, Action::InputChanged("next question".into()));

        update(
            &mut state,
            Action::SendFinished {
                text: "hello".into(),
                result: Ok("hi there".into()),
            },
        );
        assert_eq!(state.agent_response, "hi there");
        assert_eq!(state.user_input, "next question");
        assert!(!state.send_in_flight);
    }

    #[test]
    fn test_send_failure_keeps_input() {
        let mut state = connected_state();
        state.user_input = "hello".to_string();
        update(&mut state, Action::Send);

        let effect = update(
            &mut state,
            Action::SendFinished {
                text: "hello".into(),
                result: Err(ClientError::Remote("HTTP 500: boom".into())),
            },
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(state.user_input, "hello");
        assert!(!state.send_in_flight);
        assert_eq!(
            state.connection_status,
            ConnectionStatus::Error("API Error: HTTP 500: boom".into())
        );
    }

    #[test]
    fn test_refresh_only_when_connected() {
        let mut state = test_state();
        assert_eq!(update(&mut state, Action::RefreshConversation), Effect::None);

        let mut state = connected_state();
        assert!(matches!(
            update(&mut state, Action::RefreshConversation),
            Effect::FetchConversation(_)
        ));
    }

    #[test]
    fn test_conversation_loaded_replaces_list() {
        let mut state = connected_state();
        state.conversation = vec![Message::new("user", "old")];
        let fresh = vec![Message::new("user", "hello"), Message::new("gpt4free", "hi")];

        update(&mut state, Action::ConversationLoaded(Ok(fresh.clone())));
        assert_eq!(state.conversation, fresh);
    }

    #[test]
    fn test_conversation_failure_sets_error() {
        let mut state = connected_state();
        update(
            &mut state,
            Action::ConversationLoaded(Err(ClientError::Remote("HTTP 404: missing".into()))),
        );
        assert!(matches!(state.connection_status, ConnectionStatus::Error(ref m) if m.contains("missing")));
    }

    #[test]
    fn test_quit() {
        let mut state = test_state();
        assert_eq!(update(&mut state, Action::Quit), Effect::Quit);
    }
}
