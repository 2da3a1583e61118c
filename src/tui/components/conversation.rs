//! # Conversation Component
//!
//! Scrollable view of the fetched conversation.
//!
//! `Conversation` is a transient component (created each frame) that wraps
//! `&'a mut ConversationState` (persistent scroll state) and the projected
//! entries (props). Heights are measured up front with
//! [`Message::calculate_height`] so the scroll canvas can be sized before
//! anything is drawn.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;
use crate::tui::view::Entry;

/// Scroll state for the conversation panel.
/// Must be persisted in the parent TuiState.
pub struct ConversationState {
    pub scroll_state: ScrollViewState,
    /// When true, stay pinned to the newest message as the list grows
    pub stick_to_bottom: bool,
    /// Entry heights from the last render
    pub heights: Vec<u16>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            heights: Vec::new(),
            viewport_height: 0,
        }
    }

    fn max_scroll(&self) -> u16 {
        total_height(&self.heights).saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_scroll();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_scroll();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Canvas height for the given entries, capped at `u16::MAX` rows.
fn total_height(heights: &[u16]) -> u16 {
    heights.iter().copied().fold(0u16, u16::saturating_add)
}

impl EventHandler for ConversationState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.stick_to_bottom = false;
                self.scroll_state.scroll_up();
            }
            TuiEvent::ScrollPageUp => {
                self.stick_to_bottom = false;
                self.scroll_state.scroll_page_up();
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => return None,
        }
        Some(())
    }
}

pub struct Conversation<'a> {
    pub state: &'a mut ConversationState,
    pub entries: &'a [Entry],
    pub empty_hint: Option<&'a str>,
}

impl<'a> Conversation<'a> {
    pub fn new(
        state: &'a mut ConversationState,
        entries: &'a [Entry],
        empty_hint: Option<&'a str>,
    ) -> Self {
        Self {
            state,
            entries,
            empty_hint,
        }
    }
}

impl<'a> Component for Conversation<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.entries.is_empty() {
            self.state.heights.clear();
            let hint = self.empty_hint.unwrap_or_default();
            let paragraph = Paragraph::new(hint)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        self.state.heights = self
            .entries
            .iter()
            .map(|entry| Message::calculate_height(entry, content_width))
            .collect();
        let canvas_height = total_height(&self.state.heights);

        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (entry, &height) in self.entries.iter().zip(&self.state.heights) {
            // Entries past the capped canvas are cut off
            let height = height.min(canvas_height - y_offset);
            if height == 0 {
                break;
            }
            let entry_rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(Message::new(entry), entry_rect);
            y_offset += height;
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
