use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Paragraph, Widget};

/// A clickable label. Clicks are resolved by the event loop through the
/// hit areas recorded in `ui::draw_ui`; the button itself only draws.
#[derive(Clone, Copy)]
pub struct Button<'a> {
    pub label: &'a str,
    pub color: Color,
    pub enabled: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, color: Color, enabled: bool) -> Self {
        Self {
            label,
            color,
            enabled,
        }
    }

    /// Columns needed to show the label with its brackets.
    pub fn width(&self) -> u16 {
        self.label.chars().count() as u16 + 4
    }

    fn style(&self) -> Style {
        if self.enabled {
            Style::default()
                .fg(Color::White)
                .bg(self.color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        }
    }
}

impl<'a> Widget for Button<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(format!("[ {} ]", self.label))
            .style(self.style())
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
