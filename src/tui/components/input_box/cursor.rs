//! Cursor and internal-scroll tracking for the input box.
//!
//! The draft itself lives in the `Composer`; every method here takes it as
//! `draft: &str` so the ownership stays visible.

use super::text_wrap::{BORDER_OFFSET, inner_width, saturating_count, wrap_line_count, wrap_options};
use ratatui::layout::Rect;

pub(super) struct CursorState {
    /// Byte offset into the draft (0..=draft.len())
    pub pos: usize,
    /// First visible wrapped line (0 while everything fits)
    pub scroll_offset: u16,
    /// Box width from the last measure/render, used for vertical movement
    pub last_content_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_content_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Back to the origin after the draft was taken by a submission.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Wrapped line index holding the cursor.
    pub fn line(&self, draft: &str, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        if width == 0 {
            return 0;
        }

        let before = &draft[..self.pos];
        let wrapped = textwrap::wrap(before, wrap_options(width));
        let mut line = saturating_count(wrapped.len().saturating_sub(1));

        // Cursor sits right after a newline textwrap did not materialize
        if before.ends_with('\n') && !wrapped.last().is_some_and(|l| l.is_empty()) {
            line = line.saturating_add(1);
        }

        line
    }

    /// Move one wrapped line up (`-1`) or down (`1`), keeping the column where
    /// the target line is long enough. Returns false at the first/last line.
    pub fn move_vertically(&mut self, draft: &str, direction: i16, content_width: u16) -> bool {
        let width = inner_width(content_width);
        if width == 0 || draft.is_empty() {
            return false;
        }

        let lines = textwrap::wrap(draft, wrap_options(width));
        if lines.is_empty() {
            return false;
        }

        // Byte start of every wrapped line, skipping the newline that ended it
        let mut starts = Vec::with_capacity(lines.len());
        let mut offset = 0;
        for line in &lines {
            starts.push(offset);
            offset += line.len();
            if draft.as_bytes().get(offset) == Some(&b'\n') {
                offset += 1;
            }
        }

        let current = starts
            .iter()
            .zip(lines.iter())
            .position(|(&start, line)| self.pos <= start + line.len())
            .unwrap_or(lines.len() - 1);
        let column = self.pos.saturating_sub(starts[current]);

        let target = match direction {
            d if d < 0 && current > 0 => current - 1,
            d if d > 0 && current + 1 < lines.len() => current + 1,
            _ => return false,
        };

        self.pos = starts[target] + column.min(lines[target].len());
        true
    }

    /// Keep the cursor line inside the `max_lines` window.
    pub fn update_scroll_offset(&mut self, draft: &str, content_width: u16, max_lines: u16) {
        let total = wrap_line_count(draft, inner_width(content_width));
        if total <= max_lines {
            self.scroll_offset = 0;
            return;
        }

        let line = self.line(draft, content_width);
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset.saturating_add(max_lines) {
            self.scroll_offset = line.saturating_add(1).saturating_sub(max_lines);
        }
    }

    /// Screen cell (column, row) where the terminal cursor should be drawn.
    pub fn screen_pos(&self, draft: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + BORDER_OFFSET, area.y + BORDER_OFFSET);
        }

        let before = &draft[..self.pos];
        let line = self.line(draft, area.width);

        // Column: chars since the start of the current wrapped segment.
        // Counted from the logical line so trailing spaces are kept.
        let logical_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let logical = &before[logical_start..];
        let segments = textwrap::wrap(logical, wrap_options(width));
        let consumed: usize = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .map(|seg| seg.chars().count())
            .sum();
        let column = saturating_count(logical.chars().count().saturating_sub(consumed));

        let row = line.saturating_sub(self.scroll_offset);
        (
            area.x.saturating_add(BORDER_OFFSET).saturating_add(column),
            area.y.saturating_add(BORDER_OFFSET).saturating_add(row),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Width 14 leaves 10 text columns after HORIZONTAL_OVERHEAD
    const WIDTH: u16 = 14;

    #[test]
    fn line_tracks_newlines() {
        let mut cursor = CursorState::new();
        let draft = "ab\ncd\n";
        cursor.pos = 2;
        assert_eq!(cursor.line(draft, WIDTH), 0);
        cursor.pos = 3;
        assert_eq!(cursor.line(draft, WIDTH), 1);
        cursor.pos = draft.len();
        assert_eq!(cursor.line(draft, WIDTH), 2);
    }

    #[test]
    fn vertical_moves_keep_column() {
        let mut cursor = CursorState::new();
        let draft = "hello\nhi\nworld";
        cursor.pos = 4; // "hell|o"

        assert!(cursor.move_vertically(draft, 1, WIDTH));
        assert_eq!(cursor.pos, 8, "clamped to end of \"hi\"");

        assert!(cursor.move_vertically(draft, 1, WIDTH));
        assert_eq!(&draft[..cursor.pos], "hello\nhi\nwo");

        assert!(!cursor.move_vertically(draft, 1, WIDTH));
        assert!(cursor.move_vertically(draft, -1, WIDTH));
        assert_eq!(cursor.line(draft, WIDTH), 1);
    }

    #[test]
    fn vertical_move_on_empty_draft_fails() {
        let mut cursor = CursorState::new();
        assert!(!cursor.move_vertically("", -1, WIDTH));
        assert!(!cursor.move_vertically("", 1, WIDTH));
    }

    #[test]
    fn scroll_offset_follows_cursor_past_max_lines() {
        let mut cursor = CursorState::new();
        let draft = "1\n2\n3\n4\n5\n6\n7";
        cursor.pos = draft.len();

        cursor.update_scroll_offset(draft, WIDTH, 5);
        assert_eq!(cursor.scroll_offset, 2);

        cursor.pos = 0;
        cursor.update_scroll_offset(draft, WIDTH, 5);
        assert_eq!(cursor.scroll_offset, 0);
    }

    #[test]
    fn screen_pos_inside_border() {
        let mut cursor = CursorState::new();
        let area = Rect::new(0, 10, WIDTH, 4);
        let draft = "ab\nc";
        cursor.pos = draft.len();

        assert_eq!(cursor.screen_pos(draft, area), (2, 12));
    }
}
