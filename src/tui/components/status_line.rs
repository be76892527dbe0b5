use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;

use crate::tui::component::Component;
use crate::tui::theme;

const HINTS_IDLE: &str = "Ctrl+Enter send · F11 fullscreen · Ctrl+L clear · Ctrl+Q quit";
const HINTS_AWAITING: &str = "Esc cancel · F11 fullscreen · Ctrl+Q quit";

/// Bottom line: current status message on the left, key hints on the right.
pub struct StatusLine<'a> {
    pub message: &'a str,
    pub awaiting_reply: bool,
}

impl<'a> StatusLine<'a> {
    pub fn new(message: &'a str, awaiting_reply: bool) -> Self {
        Self {
            message,
            awaiting_reply,
        }
    }

    fn hints(&self) -> &'static str {
        if self.awaiting_reply {
            HINTS_AWAITING
        } else {
            HINTS_IDLE
        }
    }
}

impl<'a> Component for StatusLine<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hints = self.hints();
        let hints_width = (hints.chars().count() as u16).min(area.width / 2);
        let [message_area, hints_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(hints_width)]).areas(area);

        frame.render_widget(Line::raw(self.message), message_area);
        frame.render_widget(
            Line::styled(hints, Style::default().fg(theme::MUTED_FG)).right_aligned(),
            hints_area,
        );
    }
}
