//! # TitleBar Component
//!
//! One-line bar at the top of the window. Hidden in fullscreen mode.
//!
//! ## Conditional Formatting
//!
//! 1. **Unseen content**: `"Lantern Chat (Phase 1) | Phase 1 (UI only) | ↓ New"`
//! 2. **Status text**: `"Lantern Chat (Phase 1) | Phase 1 (UI only)"`
//! 3. **Default**: `"Lantern Chat (Phase 1)"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;
use crate::tui::theme;

/// Stateless; every field is a prop handed in by `draw_ui`.
pub struct TitleBar {
    pub window_title: String,
    /// Resting status text from config
    pub status_text: String,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(window_title: String, status_text: String, has_unseen_content: bool) -> Self {
        Self {
            window_title,
            status_text,
            has_unseen_content,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            self.window_title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if !self.status_text.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_text.as_str(),
                Style::default().fg(theme::MUTED_FG),
            ));
        }
        if self.has_unseen_content {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("↓ New", Style::default().fg(theme::ACCENT)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
