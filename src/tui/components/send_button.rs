use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;
use crate::tui::theme;

/// Columns reserved to the right of the composer.
pub const SEND_BUTTON_WIDTH: u16 = 10;

const LABEL: &str = "Send";

/// Clickable alternative to the send chord. Drawn dimmed while a reply is
/// pending; clicks are still routed but the composer refuses them.
pub struct SendButton {
    pub enabled: bool,
}

impl SendButton {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether the screen cell `(column, row)` lies on the button.
    pub fn contains(area: Rect, column: u16, row: u16) -> bool {
        area.contains(ratatui::layout::Position::new(column, row))
    }
}

impl Component for SendButton {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (fill, label_style) = if self.enabled {
            (
                theme::ACCENT,
                Style::default()
                    .fg(theme::INPUT_FG)
                    .bg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                theme::ACCENT_DISABLED,
                Style::default()
                    .fg(theme::MUTED_FG)
                    .bg(theme::ACCENT_DISABLED),
            )
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(fill))
            .style(Style::default().bg(fill));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Label sits on the middle row of the button
        let label_area = Rect {
            y: inner.y + inner.height.saturating_sub(1) / 2,
            height: inner.height.min(1),
            ..inner
        };
        frame.render_widget(
            Paragraph::new(LABEL)
                .style(label_style)
                .alignment(Alignment::Center),
            label_area,
        );
    }
}
