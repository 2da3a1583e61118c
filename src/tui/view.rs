//! # View Projection
//!
//! `build()` turns a [`ViewState`] into a [`ViewTree`]: plain data describing
//! what each panel shows. It is pure and synchronous, so what the user will
//! see can be asserted without a terminal. The widgets in `components` only
//! draw a tree; editable field buffers and scroll offsets stay in `TuiState`.

use std::borrow::Cow;

use crate::client::Message;
use crate::core::state::{ConnectionStatus, ViewState};

/// Characters of a media `src` shown before it is cut off.
const MEDIA_SRC_PREVIEW: usize = 32;

/// Everything one frame shows, derived from the view state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTree {
    pub title: TitleView,
    pub status: StatusView,
    pub conversation: Vec<Entry>,
    /// Shown in the conversation panel when there are no entries.
    pub empty_hint: Option<String>,
    pub can_send: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleView {
    pub agent_name: String,
    pub conversation_name: String,
    pub sending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Idle,
    Ok,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub text: String,
    pub kind: StatusKind,
}

/// How an entry's body is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryBody {
    /// Plain text, prefixed with the speaker.
    Text(String),
    /// Raw embedded media markup (e.g. an `<audio>` element), shown verbatim.
    Media(String),
}

/// One rendered conversation message, tagged with its original role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub role: String,
    pub body: EntryBody,
}

impl Entry {
    pub fn from_message(message: &Message) -> Self {
        let body = if message.is_user() {
            EntryBody::Text(format!("You: {}", message.message))
        } else if message.is_audio() {
            EntryBody::Media(message.message.clone())
        } else {
            EntryBody::Text(format!("{}: {}", message.role, message.message))
        };
        Self {
            role: message.role.clone(),
            body,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == "user"
    }

    /// What the conversation panel prints. Media is reduced to a one-line
    /// summary; the raw markup stays in `body`.
    pub fn display_text(&self) -> Cow<'_, str> {
        match &self.body {
            EntryBody::Text(text) => Cow::Borrowed(text),
            EntryBody::Media(raw) => Cow::Owned(media_summary(raw)),
        }
    }
}

/// `[audio] data:audio/wav;base64,UklGR…` for an embedded element.
fn media_summary(raw: &str) -> String {
    let kind = raw
        .trim_start()
        .trim_start_matches('<')
        .split(|c: char| c.is_whitespace() || c == '>')
        .next()
        .filter(|tag| !tag.is_empty())
        .unwrap_or("media");

    let src = raw
        .split_once("src=\"")
        .and_then(|(_, rest)| rest.split('"').next());

    match src {
        Some(src) if src.chars().count() > MEDIA_SRC_PREVIEW => {
            let prefix: String = src.chars().take(MEDIA_SRC_PREVIEW).collect();
            format!("[{kind}] {prefix}…")
        }
        Some(src) => format!("[{kind}] {src}"),
        None => format!("[{kind}]"),
    }
}

pub fn build(state: &ViewState) -> ViewTree {
    let status = StatusView {
        text: state.connection_status.to_string(),
        kind: match state.connection_status {
            ConnectionStatus::NotConnected => StatusKind::Idle,
            ConnectionStatus::Connected => StatusKind::Ok,
            ConnectionStatus::Error(_) => StatusKind::Failed,
        },
    };

    let conversation: Vec<Entry> = state.conversation.iter().map(Entry::from_message).collect();

    let empty_hint = if !conversation.is_empty() {
        None
    } else if !state.agent_response.is_empty() {
        Some(format!("{}: {}", state.agent_name, state.agent_response))
    } else if state.connection_status.is_connected() {
        Some("No messages yet.".to_string())
    } else {
        Some("Enter an API key and base URI, then Connect.".to_string())
    };

    ViewTree {
        title: TitleView {
            agent_name: state.agent_name.clone(),
            conversation_name: state.conversation_name.clone(),
            sending: state.send_in_flight,
        },
        status,
        conversation,
        empty_hint,
        can_send: state.connection_status.is_connected() && !state.send_in_flight,
    }
}
