pub mod adapter;
pub mod agixt;
pub mod types;

pub use adapter::{ChatClient, ClientError};
pub use agixt::AgixtClient;
pub use types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ConnectionConfig,
    ConversationQuery, ConversationResponse, Message,
};
