use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something the layout can draw into a `Rect`.
///
/// Props are plain struct fields set before the call. `render` takes
/// `&mut self` because stateful components (the conversation list) write
/// measured heights and scroll offsets back during the pass.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Turns low-level input into a component's own events.
pub trait EventHandler {
    type Event;

    /// `None` when the event was ignored or fully handled internally.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
