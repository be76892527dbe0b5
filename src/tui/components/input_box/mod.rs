//! # InputBox Component
//!
//! Terminal front for the [`Composer`]: captures keystrokes, keeps the
//! cursor, and reports how many wrapped lines the draft needs so the
//! composer can grow or shrink the input area.
//!
//! ## Responsibilities
//!
//! - Editing (chars, paste, backspace, delete, cursor movement)
//! - Submission on the send chord; plain Enter arrives here as `'\n'`
//! - Measuring the draft and forwarding height changes
//! - Internal scrolling + scrollbar once the composer hits its max height

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::composer::{Composer, HeightBounds};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme;

use cursor::CursorState;
use text_wrap::{inner_width, next_char_boundary, prev_char_boundary, wrap_line_count, wrap_options};

const PLACEHOLDER_HINT: &str = "Type a message…";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Non-blank draft taken by the send chord
    Submit(String),
    /// Draft or cursor changed, height unchanged
    ContentChanged,
    /// Draft changed and the composer picked a new height
    HeightChanged(u16),
}

pub struct InputBox {
    pub composer: Composer,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(bounds: HeightBounds) -> Self {
        Self {
            composer: Composer::new(bounds),
            cursor: CursorState::new(),
        }
    }

    pub fn draft(&self) -> &str {
        &self.composer.draft
    }

    /// Rows the input area should occupy.
    pub fn height(&self) -> u16 {
        self.composer.height()
    }

    /// Re-measure the draft at `content_width`. Returns the new height if the
    /// composer changed it. Called after edits and before every layout pass
    /// so a terminal resize is picked up.
    pub fn measure(&mut self, content_width: u16) -> Option<u16> {
        self.cursor.last_content_width = content_width;
        let lines = wrap_line_count(&self.composer.draft, inner_width(content_width));
        self.composer.on_content_changed(lines)
    }

    fn edited(&mut self) -> InputEvent {
        match self.measure(self.cursor.last_content_width) {
            Some(height) => InputEvent::HeightChanged(height),
            None => InputEvent::ContentChanged,
        }
    }

    fn max_lines(&self) -> u16 {
        self.composer.bounds().max_visible_lines()
    }

    /// Lines currently scrolled into view.
    fn visible_text(&self, content_width: u16) -> String {
        if self.cursor.scroll_offset == 0 {
            return self.composer.draft.clone();
        }

        let width = inner_width(content_width);
        if width == 0 {
            return String::new();
        }

        let lines = textwrap::wrap(&self.composer.draft, wrap_options(width));
        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + self.max_lines() as usize).min(lines.len());
        lines[start..end].join("\n")
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

        let total = wrap_line_count(&self.composer.draft, inner_width(area.width));
        let max_lines = self.max_lines();
        if total <= max_lines {
            return;
        }

        // content_length is the max scroll position, not the line count
        let mut state = ScrollbarState::default()
            .content_length(total.saturating_sub(max_lines) as usize)
            .position(self.cursor.scroll_offset as usize);

        let track = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            track,
            &mut state,
        );
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.last_content_width = area.width;
        let max_lines = self.max_lines();
        self.cursor
            .update_scroll_offset(&self.composer.draft, area.width, max_lines);

        let title = if self.composer.is_locked() {
            " Message (waiting for reply) "
        } else {
            " Message (Ctrl+Enter to send) "
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::INPUT_BORDER))
            .title(title)
            .title_style(Style::default().fg(theme::MUTED_FG))
            .style(Style::default().bg(theme::INPUT_BG));

        let paragraph = if self.composer.draft.is_empty() {
            Paragraph::new(PLACEHOLDER_HINT).style(
                Style::default()
                    .fg(theme::MUTED_FG)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Paragraph::new(self.visible_text(area.width))
                .style(Style::default().fg(theme::INPUT_FG))
        };

        let inner = block.inner(area);
        frame.render_widget(block, area);
        // One column of padding each side, matching HORIZONTAL_OVERHEAD
        let text_area = Rect {
            x: inner.x,
            width: inner.width.saturating_sub(2),
            ..inner
        };
        frame.render_widget(paragraph, text_area);
        self.render_scrollbar(frame, area);

        let position = self.cursor.screen_pos(&self.composer.draft, area);
        frame.set_cursor_position(position);
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let draft = &mut self.composer.draft;
        let pos = self.cursor.pos;
        match event {
            TuiEvent::InputChar(c) => {
                draft.insert(pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(self.edited())
            }
            TuiEvent::Paste(text) => {
                // Terminals deliver pasted line breaks as \r or \r\n
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                draft.insert_str(pos, &text);
                self.cursor.pos += text.len();
                Some(self.edited())
            }
            TuiEvent::Backspace if pos > 0 => {
                let prev = prev_char_boundary(draft, pos);
                draft.drain(prev..pos);
                self.cursor.pos = prev;
                Some(self.edited())
            }
            TuiEvent::Delete if pos < draft.len() => {
                let next = next_char_boundary(draft, pos);
                draft.drain(pos..next);
                Some(self.edited())
            }
            TuiEvent::CursorLeft if pos > 0 => {
                self.cursor.pos = prev_char_boundary(draft, pos);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight if pos < draft.len() => {
                self.cursor.pos = next_char_boundary(draft, pos);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome => {
                let line_start = draft[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
                (pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = draft[pos..].find('\n').map(|i| pos + i).unwrap_or(draft.len());
                (pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorUp => {
                let width = self.cursor.last_content_width;
                self.cursor
                    .move_vertically(draft, -1, width)
                    .then_some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorDown => {
                let width = self.cursor.last_content_width;
                self.cursor
                    .move_vertically(draft, 1, width)
                    .then_some(InputEvent::ContentChanged)
            }
            TuiEvent::Submit => {
                let text = self.composer.submit()?;
                self.cursor.reset();
                self.measure(self.cursor.last_content_width);
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}
