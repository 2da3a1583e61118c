use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::tui::view::{Entry, EntryBody};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single conversation entry with role-based styling.
///
/// # Styling
///
/// - **User** (blue): `You: ...`
/// - **Media** (magenta): raw embedded markup, shown verbatim
/// - **Anything else** (green): `<role>: ...`
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts rendered height with
/// `textwrap` options that match Ratatui's `Paragraph` wrapping, so the list can
/// size its scroll canvas without rendering every entry.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub entry: &'a Entry,
}

impl<'a> Message<'a> {
    pub fn new(entry: &'a Entry) -> Self {
        Self { entry }
    }

    /// Calculate the height required for this entry given a width.
    pub fn calculate_height(entry: &Entry, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding: still occupy one row
            return 1;
        }

        let text = entry.display_text();
        let content = text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options).len();
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

fn entry_style(entry: &Entry) -> Style {
    match entry.body {
        EntryBody::Media(_) => Style::default().fg(Color::Magenta),
        EntryBody::Text(_) if entry.is_user() => Style::default().fg(Color::Blue),
        EntryBody::Text(_) => Style::default().fg(Color::Green),
    }
}

fn entry_title(entry: &Entry) -> String {
    match entry.body {
        EntryBody::Media(_) => format!("{} · media", entry.role),
        EntryBody::Text(_) if entry.is_user() => "you".to_string(),
        EntryBody::Text(_) => entry.role.clone(),
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = entry_style(self.entry);
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(entry_title(self.entry))
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let text_style = match self.entry.body {
            EntryBody::Media(_) => style.add_modifier(Modifier::ITALIC),
            EntryBody::Text(_) => style,
        };
        let text = self.entry.display_text();
        Paragraph::new(text.trim())
            .style(text_style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Message as RemoteMessage;

    fn entry(role: &str, text: &str) -> Entry {
        Entry::from_message(&RemoteMessage::new(role, text))
    }

    #[test]
    fn calculate_height_single_line_fits() {
        // "You: Hello" fits in width 80 - HORIZONTAL_OVERHEAD
        assert_eq!(
            Message::calculate_height(&entry("user", "Hello"), 80),
            1 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        assert_eq!(Message::calculate_height(&entry("user", "Hello"), 0), 1);
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        // "agent: aaaa bbbb" in content width 6 → "agent:" | "aaaa" | "bbbb"
        assert_eq!(
            Message::calculate_height(&entry("agent", "aaaa bbbb"), 6 + HORIZONTAL_OVERHEAD),
            3 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_saturates_on_huge_entry() {
        // One word per row at content width 1: 70_000 rows
        let huge = "a ".repeat(70_000);
        assert_eq!(
            Message::calculate_height(&entry("gpt4free", &huge), 1 + HORIZONTAL_OVERHEAD),
            u16::MAX
        );
    }

    #[test]
    fn media_height_ignores_payload_size() {
        let raw = format!(
            "<audio controls src=\"data:audio/wav;base64,{}\"></audio>",
            "A".repeat(1_200_000)
        );
        assert_eq!(
            Message::calculate_height(&entry("gpt4free", &raw), 80),
            1 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn style_user_is_blue() {
        assert_eq!(entry_style(&entry("user", "hi")).fg, Some(Color::Blue));
    }

    #[test]
    fn style_agent_is_green() {
        assert_eq!(entry_style(&entry("gpt4free", "hi")).fg, Some(Color::Green));
    }

    #[test]
    fn style_media_is_magenta() {
        let media = entry("gpt4free", "<audio controls src=\"a.wav\"></audio>");
        assert_eq!(entry_style(&media).fg, Some(Color::Magenta));
        assert_eq!(entry_title(&media), "gpt4free · media");
    }

    #[test]
    fn renders_prefixed_text() {
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = ratatui::buffer::Buffer::empty(area);
        let e = entry("gpt4free", "hi there");
        Message::new(&e).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("gpt4free: hi there"));
    }
}
