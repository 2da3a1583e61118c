use crate::core::state::ViewState;
use crate::tui::component::Component;
use crate::tui::components::{Button, Conversation, TitleBar};
use crate::tui::view::{self, StatusKind, StatusView};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

/// Screen regions that respond to clicks, captured on the last draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitAreas {
    pub api_key: Rect,
    pub base_uri: Rect,
    pub connect: Rect,
    pub message: Rect,
    pub send: Rect,
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Connect,
    Send,
    Field(Focus),
}

pub fn draw_ui(frame: &mut Frame, state: &ViewState, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let tree = view::build(state);

    let layout = Layout::vertical([Length(1), Length(5), Min(0), Length(3)]);
    let [title_area, config_area, conversation_area, input_area] = layout.areas(frame.area());

    TitleBar::new(&tree.title, tui.spinner_frame).render(frame, title_area);

    // Connection panel: key, URI, then the Connect button beside the status
    let config_block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title("Connection");
    let config_inner = config_block.inner(config_area);
    frame.render_widget(config_block, config_area);

    let [key_area, uri_area, action_area] =
        Layout::vertical([Length(1), Length(1), Length(1)]).areas(config_inner);
    tui.api_key_field.render(frame, key_area);
    tui.base_uri_field.render(frame, uri_area);

    let connect = Button::new("Connect", Color::Green, true);
    let [connect_area, _, status_area] =
        Layout::horizontal([Length(connect.width()), Length(1), Min(0)]).areas(action_area);
    frame.render_widget(connect, connect_area);
    frame.render_widget(status_line(&tree.status), status_area);

    let conversation_block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title("Conversation");
    let conversation_inner = conversation_block.inner(conversation_area);
    frame.render_widget(conversation_block, conversation_area);
    Conversation::new(
        &mut tui.conversation,
        &tree.conversation,
        tree.empty_hint.as_deref(),
    )
    .render(frame, conversation_inner);

    let send = Button::new("Send", Color::Blue, tree.can_send);
    let [message_area, send_column] =
        Layout::horizontal([Min(0), Length(send.width())]).areas(input_area);
    tui.message_field.render(frame, message_area);
    let send_area = Rect {
        y: send_column.y + send_column.height / 2,
        height: send_column.height.min(1),
        ..send_column
    };
    frame.render_widget(send, send_area);

    tui.hit_areas = HitAreas {
        api_key: key_area,
        base_uri: uri_area,
        connect: connect_area,
        message: message_area,
        send: send_area,
    };
}

fn status_line(status: &StatusView) -> Paragraph<'_> {
    let color = match status.kind {
        StatusKind::Idle => Color::Gray,
        StatusKind::Ok => Color::Green,
        StatusKind::Failed => Color::Red,
    };
    Paragraph::new(status.text.as_str()).style(Style::default().fg(color))
}

/// Map a click position to the element drawn there.
pub fn hit_test(areas: &HitAreas, column: u16, row: u16) -> Option<Target> {
    let position = Position::new(column, row);
    if areas.connect.contains(position) {
        Some(Target::Connect)
    } else if areas.send.contains(position) {
        Some(Target::Send)
    } else if areas.api_key.contains(position) {
        Some(Target::Field(Focus::ApiKey))
    } else if areas.base_uri.contains(position) {
        Some(Target::Field(Focus::BaseUri))
    } else if areas.message.contains(position) {
        Some(Target::Field(Focus::Message))
    } else {
        None
    }
}
