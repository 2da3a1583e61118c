//! # TUI Components
//!
//! Components in this directory follow two patterns.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive all data for the frame as struct fields:
//! - `TitleBar`: agent, conversation and the in-flight spinner
//! - `Message`: one conversation entry
//! - `Button`: a clickable label
//!
//! ### Stateful Components (Event-Driven)
//!
//! Keep local state across frames and emit events:
//! - `TextField`: API key, base URI and message inputs
//! - `Conversation`: scrollable list of entries
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── button.rs        (Connect / Send)
//! ├── conversation.rs  (Scrollable entry list)
//! ├── message.rs       (Single entry renderer)
//! ├── text_field.rs    (Single-line editable field)
//! └── title_bar.rs     (Top row)
//! ```

pub mod button;
pub mod conversation;
pub mod message;
pub mod text_field;
mod title_bar;

pub use button::Button;
pub use conversation::{Conversation, ConversationState};
pub use text_field::{FieldEvent, FieldLayout, TextField};
pub use title_bar::TitleBar;
