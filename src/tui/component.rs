use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the screen that draws itself into a `Rect`.
///
/// Props arrive as struct fields; anything that must survive between frames
/// (scroll offsets, layout caches, cursor position) lives behind `&mut self`,
/// which is why `render` is not `&self`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes terminal events.
pub trait EventHandler {
    /// The high-level event this component reports to the event loop.
    type Event;

    /// Handle a low-level `TuiEvent`; `None` means nothing worth reporting.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
