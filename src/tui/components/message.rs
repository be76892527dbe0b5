use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::message::{BubbleAlign, Message};
use crate::tui::component::Component;
use crate::tui::theme;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Empty row left under every bubble.
const BUBBLE_GAP: u16 = 1;

/// Pulse intensity threshold above which the border transitions from normal to BOLD.
const PULSE_BOLD_THRESHOLD: f32 = 0.6;
/// Pulse intensity threshold above which the border transitions from DIM to normal.
const PULSE_NORMAL_THRESHOLD: f32 = 0.2;

/// A single chat bubble, colored and aligned by role.
///
/// # Design
///
/// `Bubble` is a **transient component**: built fresh each frame from a
/// borrowed `Message`. It holds no state; the pulse value for the typing
/// placeholder is handed in by the parent `MessageList`.
///
/// # Sizing
///
/// A bubble shrink-wraps its text and is capped at three quarters of the
/// transcript width (`full_width` lifts the cap in fullscreen mode). The
/// height is predicted with `textwrap`, using options that match
/// `Paragraph`'s wrapping, so the list can lay out and scroll without
/// rendering first.
#[derive(Clone, Copy)]
pub struct Bubble<'a> {
    pub message: &'a Message,
    pub full_width: bool,
    /// Current pulse intensity (0.0 to 1.0); only used by the placeholder
    pub pulse_intensity: f32,
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message, full_width: bool, pulse_intensity: f32) -> Self {
        Self {
            message,
            full_width,
            pulse_intensity,
        }
    }

    /// Outer width of the bubble inside a list `available` columns wide.
    pub fn width(message: &Message, available: u16, full_width: bool) -> u16 {
        let cap = if full_width {
            available
        } else {
            (available.saturating_mul(3) / 4).max(available.min(24))
        };

        let longest_line = message
            .display_text()
            .trim()
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0)
            .min(u16::MAX as usize) as u16;
        let title_width = title(message).width() as u16 + 2;

        longest_line
            .saturating_add(HORIZONTAL_OVERHEAD)
            .max(title_width)
            .min(cap)
    }

    /// Rows occupied by the bubble including the gap beneath it.
    pub fn calculate_height(message: &Message, available: u16, full_width: bool) -> u16 {
        let width = Self::width(message, available, full_width);
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row
            return 1;
        }

        let content = message.display_text().trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD + BUBBLE_GAP;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let lines = textwrap::wrap(content, options);

        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD + BUBBLE_GAP)
    }
}

fn title(message: &Message) -> String {
    if message.is_placeholder {
        return format!(" {} ", message.role.label());
    }
    format!(
        " {} · {} ",
        message.role.label(),
        message.created_at.format("%H:%M")
    )
}

impl<'a> Widget for Bubble<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let palette = theme::palette(self.message.role);
        let width = Self::width(self.message, area.width, self.full_width);
        let x = match palette.align {
            BubbleAlign::Left => area.x,
            BubbleAlign::Right => area.x + area.width.saturating_sub(width),
        };
        let bubble_area = Rect::new(x, area.y, width, area.height.saturating_sub(BUBBLE_GAP));

        let text_style = Style::default().fg(palette.foreground).bg(palette.background);
        let mut border_style = text_style.add_modifier(Modifier::DIM);

        // Three-phase breathing on the placeholder border: DIM → normal → BOLD
        if self.pulse_intensity > PULSE_BOLD_THRESHOLD {
            border_style = border_style
                .remove_modifier(Modifier::DIM)
                .add_modifier(Modifier::BOLD);
        } else if self.pulse_intensity > PULSE_NORMAL_THRESHOLD {
            border_style = border_style.remove_modifier(Modifier::DIM);
        }

        let block = Block::bordered()
            .title(title(self.message))
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .style(text_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(bubble_area);
        block.render(bubble_area, buf);

        let mut content_style = text_style;
        if self.message.is_placeholder {
            content_style = content_style.add_modifier(Modifier::ITALIC);
        }
        Paragraph::new(self.message.display_text().trim())
            .style(content_style)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

/// `Bubble` is stateless; this impl only delegates to [`Widget`].
impl<'a> Component for Bubble<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
