//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Actions are applied to the [`ViewState`] with `core::action::update`. Any
//! effect it returns runs on a tokio task through `controller::perform`, and
//! the follow-up action comes back over an mpsc channel, so the loop never
//! blocks on the network.
//!
//! ## Redraw Strategy
//!
//! - **Sending**: draws every ~80ms to animate the title bar spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events or finished requests.

mod component;
mod components;
mod event;
mod ui;
pub mod view;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::client::{AgixtClient, ChatClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::controller;
use crate::core::state::ViewState;
use crate::tui::component::EventHandler;
use crate::tui::components::{ConversationState, FieldEvent, FieldLayout, TextField};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::{HitAreas, Target};

/// Which text field receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    ApiKey,
    BaseUri,
    Message,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::ApiKey => Focus::BaseUri,
            Focus::BaseUri => Focus::Message,
            Focus::Message => Focus::ApiKey,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::ApiKey => Focus::Message,
            Focus::BaseUri => Focus::ApiKey,
            Focus::Message => Focus::BaseUri,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub api_key_field: TextField,
    pub base_uri_field: TextField,
    pub message_field: TextField,
    pub conversation: ConversationState,
    pub focus: Focus,
    /// Clickable regions from the last draw
    pub hit_areas: HitAreas,
    pub spinner_frame: usize,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            api_key_field: TextField::new("API Key", FieldLayout::Inline).masked(),
            base_uri_field: TextField::new("Base URI", FieldLayout::Inline),
            message_field: TextField::new("Message", FieldLayout::Boxed),
            conversation: ConversationState::new(),
            focus: Focus::Message, // User expects to type immediately
            hit_areas: HitAreas::default(),
            spinner_frame: 0,
        }
    }

    /// Push session values into the field buffers and mark the focused field.
    pub fn sync(&mut self, state: &ViewState) {
        self.api_key_field.sync(&state.api_key);
        self.base_uri_field.sync(&state.base_uri);
        self.message_field.sync(&state.user_input);

        self.api_key_field.focused = self.focus == Focus::ApiKey;
        self.base_uri_field.focused = self.focus == Focus::BaseUri;
        self.message_field.focused = self.focus == Focus::Message;
    }

    fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            Focus::ApiKey => &mut self.api_key_field,
            Focus::BaseUri => &mut self.base_uri_field,
            Focus::Message => &mut self.message_field,
        }
    }

    /// Translate one input event into a session action, handling
    /// presentation-only events (focus, scrolling, cursor motion) in place.
    pub fn route_event(&mut self, event: &TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::Quit | TuiEvent::ForceQuit => Some(Action::Quit),
            TuiEvent::Refresh => Some(Action::RefreshConversation),
            TuiEvent::Resize => None,
            TuiEvent::FocusNext => {
                self.focus = self.focus.next();
                None
            }
            TuiEvent::FocusPrev => {
                self.focus = self.focus.prev();
                None
            }
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown
            | TuiEvent::ScrollToBottom => {
                self.conversation.handle_event(event);
                None
            }
            TuiEvent::MouseClick(column, row) => {
                match ui::hit_test(&self.hit_areas, *column, *row)? {
                    Target::Connect => Some(Action::Connect),
                    Target::Send => Some(Action::Send),
                    Target::Field(focus) => {
                        self.focus = focus;
                        None
                    }
                }
            }
            _ => {
                let focus = self.focus;
                match self.focused_field().handle_event(event)? {
                    FieldEvent::Changed(value) => Some(match focus {
                        Focus::ApiKey => Action::ApiKeyChanged(value),
                        Focus::BaseUri => Action::BaseUriChanged(value),
                        Focus::Message => Action::InputChanged(value),
                    }),
                    FieldEvent::Submit => Some(match focus {
                        Focus::ApiKey | Focus::BaseUri => Action::Connect,
                        Focus::Message => Action::Send,
                    }),
                }
            }
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste
        );
    }
}

/// Apply an action and start whatever effect it asks for.
/// Returns false once the session should end.
fn apply(
    state: &mut ViewState,
    action: Action,
    client: &Arc<dyn ChatClient>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match update(state, action) {
        Effect::Quit => false,
        Effect::None => true,
        effect => {
            spawn_effect(client.clone(), effect, tx.clone());
            true
        }
    }
}

fn spawn_effect(client: Arc<dyn ChatClient>, effect: Effect, tx: mpsc::Sender<Action>) {
    info!("Spawning request via {}", client.name());
    tokio::spawn(async move {
        if let Some(action) = controller::perform(client.as_ref(), effect).await
            && tx.send(action).is_err()
        {
            warn!("Failed to deliver request result: receiver dropped");
        }
    });
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client: Arc<dyn ChatClient> = Arc::new(AgixtClient::default());
    let mut state = ViewState::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    if config.auto_connect {
        apply(&mut state, Action::Connect, &client, &tx);
    }

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'session: loop {
        tui.sync(&state);

        let animating = state.send_in_flight;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &state, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain every pending event before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = tui.route_event(&event) {
                if !apply(&mut state, action, &client, &tx) {
                    break 'session;
                }
                // Keep later events in this batch editing the updated buffers
                tui.sync(&state);
            }
        }

        // Results from background requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if !apply(&mut state, action, &client, &tx) {
                break 'session;
            }
        }
    }

    info!("Session ended");
    ratatui::restore();
    Ok(())
}
