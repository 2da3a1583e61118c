//! # TitleBar Component
//!
//! Top row showing which agent and conversation the session talks to, plus a
//! spinner while a message is in flight.
//!
//! Stateless: every field is a prop copied from the [`TitleView`] for this
//! frame, so the same struct can be asserted against a `TestBackend` without
//! the rest of the layout.

use crate::tui::component::Component;
use crate::tui::view::TitleView;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub struct TitleBar {
    pub agent_name: String,
    pub conversation_name: String,
    /// A send is outstanding
    pub sending: bool,
    /// Advances once per animation tick while `sending`
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(view: &TitleView, spinner_frame: usize) -> Self {
        Self {
            agent_name: view.agent_name.clone(),
            conversation_name: view.conversation_name.clone(),
            sending: view.sending,
            spinner_frame,
        }
    }

    fn text(&self) -> String {
        let base = format!(
            "agixt-chat | agent: {} | conversation: {}",
            self.agent_name, self.conversation_name
        );
        if self.sending {
            let spin = SPINNER[self.spinner_frame % SPINNER.len()];
            format!("{base} | {spin} sending")
        } else {
            base
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default().add_modifier(Modifier::BOLD);
        let mut spans = vec![Span::styled(self.text(), style)];
        if !self.sending {
            spans.push(Span::styled(
                "  (Tab: focus, Ctrl+R: refresh, Esc: quit)",
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
