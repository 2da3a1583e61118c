//! # Session Controller
//!
//! Performs the remote calls described by an [`Effect`] and turns their
//! results back into [`Action`]s. The TUI runs [`perform`] on a background
//! task; tests and headless callers use [`dispatch`], which drives an action
//! and every follow-up effect to completion before returning.

use log::debug;

use crate::client::ChatClient;
use crate::core::action::{Action, Effect, update};
use crate::core::state::ViewState;

/// Runs one effect against the client. `None` means nothing follows.
pub async fn perform(client: &dyn ChatClient, effect: Effect) -> Option<Action> {
    match effect {
        Effect::None | Effect::Quit => None,
        Effect::CheckConnection(config) => {
            debug!("{}: check_connection", client.name());
            Some(Action::ConnectFinished(client.check_connection(&config).await))
        }
        Effect::SendMessage(req) => {
            debug!("{}: send_message", client.name());
            let result = client
                .send_message(&req.config, &req.agent_name, &req.conversation_name, &req.text)
                .await;
            Some(Action::SendFinished {
                text: req.text,
                result,
            })
        }
        Effect::FetchConversation(req) => {
            debug!("{}: fetch_conversation", client.name());
            let result = client
                .fetch_conversation(&req.config, &req.agent_name, &req.conversation_name)
                .await;
            Some(Action::ConversationLoaded(result))
        }
    }
}

/// Applies `action` and awaits each resulting remote call in turn.
///
/// Returns `false` once the session asked to quit.
pub async fn dispatch(state: &mut ViewState, client: &dyn ChatClient, action: Action) -> bool {
    let mut next = Some(action);
    while let Some(action) = next.take() {
        match update(state, action) {
            Effect::Quit => return false,
            effect => next = perform(client, effect).await,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ChatMessage, ClientError, Message};
    use crate::core::state::ConnectionStatus;
    use crate::test_support::{Call, RecordingClient, test_state};

    #[tokio::test]
    async fn test_connect_then_send_scenario() {
        let client = RecordingClient::replying("hi there");
        let mut state = test_state();

        assert!(dispatch(&mut state, &client, Action::Connect).await);
        assert_eq!(state.connection_status.to_string(), "Connected");

        dispatch(&mut state, &client, Action::InputChanged("hello".into())).await;
        dispatch(&mut state, &client, Action::Send).await;

        let sent = client.sent_requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].model, "gpt4free");
        assert_eq!(sent[0].messages, vec![ChatMessage::user("hello")]);
        assert_eq!(sent[0].user, "My Conversation");

        assert_eq!(state.agent_response, "hi there");
        assert_eq!(state.user_input, "");
    }

    #[tokio::test]
    async fn test_send_while_disconnected_makes_no_call() {
        let client = RecordingClient::replying("unused");
        let mut state = test_state();
        state.user_input = "hello".to_string();
        let before = state.clone();

        dispatch(&mut state, &client, Action::Send).await;

        assert!(client.calls().is_empty());
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn test_successful_check_leads_to_attempted_send() {
        let client = RecordingClient::replying("ok");
        let mut state = test_state();
        dispatch(&mut state, &client, Action::Connect).await;
        dispatch(&mut state, &client, Action::Send).await;
        assert!(client.calls().iter().any(|c| matches!(c, Call::Send(_))));
    }

    #[tokio::test]
    async fn test_failed_connect_records_message() {
        let client = RecordingClient::failing_connect("authentication rejected (HTTP 401)");
        let mut state = test_state();
        state.user_input = "draft".to_string();

        dispatch(&mut state, &client, Action::Connect).await;

        assert_eq!(
            state.connection_status,
            ConnectionStatus::Error("Connection error: authentication rejected (HTTP 401)".into())
        );
        assert_eq!(state.user_input, "draft");
        // No fetch after a failed check
        assert_eq!(client.calls(), vec![Call::Check]);
    }

    #[tokio::test]
    async fn test_failed_send_keeps_input() {
        let client = RecordingClient::failing_send(ClientError::Remote("HTTP 502: bad gateway".into()));
        let mut state = test_state();
        dispatch(&mut state, &client, Action::Connect).await;
        dispatch(&mut state, &client, Action::InputChanged("hello".into())).await;
        dispatch(&mut state, &client, Action::Send).await;

        assert_eq!(state.user_input, "hello");
        assert!(state.connection_status.to_string().contains("bad gateway"));
        assert!(!state.send_in_flight);
    }

    #[tokio::test]
    async fn test_send_refreshes_conversation() {
        let client = RecordingClient::replying("hi there").with_conversation(vec![
            Message::new("user", "hello"),
            Message::new("gpt4free", "hi there"),
        ]);
        let mut state = test_state();
        dispatch(&mut state, &client, Action::Connect).await;
        dispatch(&mut state, &client, Action::InputChanged("hello".into())).await;
        dispatch(&mut state, &client, Action::Send).await;

        assert_eq!(
            client.calls(),
            vec![Call::Check, Call::Fetch, Call::Send("hello".into()), Call::Fetch]
        );
        assert_eq!(state.conversation.len(), 2);
    }

    #[test]
    fn test_quit_stops_dispatch() {
        let client = RecordingClient::replying("unused");
        let mut state = test_state();
        let running = tokio_test::block_on(dispatch(&mut state, &client, Action::Quit));
        assert!(!running);
    }

    #[tokio::test]
    async fn test_perform_none_yields_nothing() {
        let client = RecordingClient::replying("unused");
        assert_eq!(perform(&client, Effect::None).await, None);
        assert!(client.calls().is_empty());
    }
}
