//! # TextField Component
//!
//! Single-line editable text used for the API key, the base URI and the
//! message being typed.
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. The session's copy of the value
//! lives in `ViewState`; the event loop pushes it back in with [`TextField::sync`]
//! each iteration, so a cleared `user_input` also clears the field.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const MASK_CHAR: char = '•';

/// High-level events emitted by a TextField
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// The buffer changed; carries the full new value.
    Changed(String),
    /// Enter pressed
    Submit,
}

/// How the field is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLayout {
    /// `Label: value` on a single row.
    Inline,
    /// Rounded border with the label as its title.
    Boxed,
}

pub struct TextField {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Whether keyboard input goes here (Prop)
    pub focused: bool,
    label: &'static str,
    masked: bool,
    layout: FieldLayout,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
}

impl TextField {
    pub fn new(label: &'static str, layout: FieldLayout) -> Self {
        Self {
            buffer: String::new(),
            focused: false,
            label,
            masked: false,
            layout,
            cursor: 0,
        }
    }

    /// Render every character as a bullet.
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Replace the buffer with `value` if it differs, moving the cursor to the end.
    pub fn sync(&mut self, value: &str) {
        if self.buffer != value {
            self.buffer = value.to_string();
            self.cursor = self.buffer.len();
        }
    }

    fn display_chars(&self) -> Vec<char> {
        if self.masked {
            self.buffer.chars().map(|_| MASK_CHAR).collect()
        } else {
            self.buffer.chars().collect()
        }
    }

    /// Cursor position counted in chars rather than bytes.
    fn cursor_char_index(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }

    fn changed(&self) -> Option<FieldEvent> {
        Some(FieldEvent::Changed(self.buffer.clone()))
    }
}

/// Picks the part of `chars` that fits in `width` columns with the cursor visible.
///
/// Returns the visible text and the cursor's column within it.
fn visible_window(chars: &[char], cursor: usize, width: u16) -> (String, u16) {
    let width = width as usize;
    if width == 0 {
        return (String::new(), 0);
    }

    let col_width = |c: &char| c.width().unwrap_or(0);
    let cursor_col: usize = chars[..cursor].iter().map(col_width).sum();

    // Scroll right until the cursor lands inside the window (last column kept for it)
    let mut start = 0;
    let mut skipped = 0;
    while cursor_col - skipped >= width && start < cursor {
        skipped += col_width(&chars[start]);
        start += 1;
    }

    let mut visible = String::new();
    let mut used = 0;
    for c in &chars[start..] {
        let w = col_width(c);
        if used + w > width {
            break;
        }
        visible.push(*c);
        used += w;
    }

    (visible, (cursor_col - skipped) as u16)
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let label_style = if self.focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let value_area = match self.layout {
            FieldLayout::Inline => {
                let label = format!("{}: ", self.label);
                let label_width = (label.chars().count() as u16).min(area.width);
                frame.render_widget(Span::styled(label, label_style), area);
                Rect {
                    x: area.x + label_width,
                    width: area.width - label_width,
                    height: area.height.min(1),
                    ..area
                }
            }
            FieldLayout::Boxed => {
                let block = Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(label_style)
                    .title(self.label);
                let inner = block.inner(area);
                frame.render_widget(block, area);
                inner
            }
        };

        let chars = self.display_chars();
        let (visible, cursor_col) =
            visible_window(&chars, self.cursor_char_index(), value_area.width);
        frame.render_widget(Paragraph::new(Line::from(visible)), value_area);

        if self.focused && value_area.width > 0 && value_area.height > 0 {
            frame.set_cursor_position(Position {
                x: value_area.x + cursor_col,
                y: value_area.y,
            });
        }
    }
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                // Single line: pasted newlines become spaces
                let flat: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.buffer.insert_str(self.cursor, &flat);
                self.cursor += flat.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                self.changed()
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => Some(FieldEvent::Submit),
            _ => None,
        }
    }
}
