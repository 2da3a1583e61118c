//! # Core Application Logic
//!
//! The chat session's business logic. It knows nothing about any specific
//! UI technology and performs no I/O except through a [`ChatClient`].
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ViewState            │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • controller (effects) │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │ ChatClient │
//!     │  Adapter   │                          │  (AGiXT)   │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `ViewState` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`controller`]: Runs effects against a client
//! - [`config`]: Defaults, config file, env and CLI resolution
//!
//! [`ChatClient`]: crate::client::ChatClient

pub mod action;
pub mod config;
pub mod controller;
pub mod state;
