use serde::{Deserialize, Serialize};

/// Endpoint and credential for one remote call.
///
/// Built from the view state every time a call is made and passed by value;
/// no connection object outlives the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub base_uri: String,
    pub api_key: String,
}

impl ConnectionConfig {
    pub fn new(base_uri: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            api_key: api_key.into(),
        }
    }
}

/// One entry of a stored conversation, as returned by the conversation store.
///
/// The store names the text field `message`, while the completion API uses
/// `content` (see [`ChatMessage`]). Both names are kept as the server sends them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub message: String,
}

impl Message {
    pub fn new(role: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            message: message.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == "user"
    }

    /// Audio replies arrive as an inline `<audio ...>` element.
    pub fn is_audio(&self) -> bool {
        self.message.starts_with("<audio")
    }
}

/// Outgoing chat message (completion API schema).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of `POST /v1/chat/completions`.
///
/// The agent is addressed through `model` and the conversation through `user`.
#[derive(Serialize, Debug, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub user: String,
}

#[derive(Deserialize, Debug)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: String,
}

impl ChatCompletionResponse {
    /// Reply text of the first choice, if the server returned one.
    pub fn first_content(self) -> Option<String> {
        self.choices.into_iter().next().map(|c| c.message.content)
    }
}

/// Body of `GET /api/conversation`.
#[derive(Serialize, Debug)]
pub struct ConversationQuery<'a> {
    pub agent_name: &'a str,
    pub conversation_name: &'a str,
}

#[derive(Deserialize, Debug)]
pub struct ConversationResponse {
    #[serde(default)]
    pub conversation_history: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Contract test: the completion request must match what the server expects.
    #[test]
    fn test_chat_completion_request_serialization() {
        let req = ChatCompletionRequest {
            model: "gpt4free".to_string(),
            messages: vec![ChatMessage::user("hello")],
            user: "My Conversation".to_string(),
        };

        let serialized = serde_json::to_string(&req).unwrap();
        let expected = r#"{"model":"gpt4free","messages":[{"role":"user","content":"hello"}],"user":"My Conversation"}"#;
        assert_eq!(serialized, expected);
    }

    #[test]
    fn test_first_content_takes_first_choice() {
        let json = r#"{"choices":[{"message":{"content":"hi there"}},{"message":{"content":"ignored"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_content().as_deref(), Some("hi there"));
    }

    #[test]
    fn test_first_content_empty_choices() {
        let response: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.first_content(), None);
    }

    #[test]
    fn test_conversation_uses_message_field() {
        let json = r#"{"conversation_history":[
            {"role":"user","message":"hello","timestamp":"2024-01-01"},
            {"role":"gpt4free","message":"hi there"}
        ]}"#;
        let response: ConversationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.conversation_history,
            vec![Message::new("user", "hello"), Message::new("gpt4free", "hi there")]
        );
    }

    #[test]
    fn test_message_kinds() {
        assert!(Message::new("user", "hi").is_user());
        assert!(!Message::new("assistant", "hi").is_user());
        assert!(Message::new("assistant", "<audio controls src=\"x.wav\"></audio>").is_audio());
        assert!(!Message::new("assistant", "about <audio>").is_audio());
    }
}
