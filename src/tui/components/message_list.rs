//! # MessageList Component
//!
//! Scrollable view of the transcript.
//!
//! ## Responsibilities
//!
//! - Lay out bubbles and cache their heights per entry
//! - Keep the newest entry in view after every transcript mutation
//! - Manual scrolling (wheel, PageUp/PageDown) and re-pinning at the bottom
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and `&'a Transcript` (props).
//!
//! ## Scroll-to-end ordering
//!
//! Each render first measures every entry for the current width, then, if
//! the transcript revision moved since the last frame, re-pins to the
//! bottom and sets the offset from the freshly measured total. The offset
//! is never derived from stale heights, so the bottom row of the newest
//! bubble is always on screen.
//!
//! ## Canvas window
//!
//! Row positions are tracked as `u32`, but `ScrollView` sizes and offsets
//! are `u16`. When the transcript outgrows `u16::MAX` rows only the newest
//! entries that fit (starting on an entry boundary) are placed on the
//! scroll canvas; older rows are no longer reachable by scrolling.

use std::collections::HashMap;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::{Entry, EntryHandle, Transcript};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Bubble;
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, the view follows the newest entry
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Content exists below the viewport
    pub has_unseen_content: bool,
    /// Transcript revision seen by the last render
    last_revision: Option<u64>,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            has_unseen_content: false,
            last_revision: None,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.canvas_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scrollable transcript view.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    /// Lifts the bubble width cap (fullscreen mode)
    pub full_width: bool,
    pub pulse_value: f32,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        full_width: bool,
        pulse_value: f32,
    ) -> Self {
        Self {
            state,
            transcript,
            full_width,
            pulse_value,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let entries = self.transcript.entries();

        // 1. Measure
        self.state
            .layout
            .sync(entries, content_width, self.full_width);
        let canvas_height = self.state.layout.canvas_height();
        self.state.viewport_height = area.height;

        // 2. Any mutation since the last frame pins the view to the newest entry
        let revision = self.transcript.revision();
        if self.state.last_revision != Some(revision) {
            self.state.last_revision = Some(revision);
            self.state.stick_to_bottom = true;
        }

        // 3. Position, now that heights are settled
        if self.state.stick_to_bottom {
            self.state.scroll_state.set_offset(Position {
                x: 0,
                y: self.state.max_offset(),
            });
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible = self.state.layout.visible_range(scroll_offset, area.height);

        // 4. Render visible bubbles into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset = self.state.layout.canvas_top_of(visible.start);
        for i in visible {
            let entry = &entries[i];
            let height = self.state.layout.heights[i];
            let pulse = if entry.message.is_placeholder {
                self.pulse_value
            } else {
                0.0
            };

            let bubble = Bubble::new(&entry.message, self.full_width, pulse);
            scroll_view.render_widget(bubble, Rect::new(0, y_offset, content_width, height));
            y_offset = y_offset.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        self.state.has_unseen_content = scroll_offset < self.state.max_offset();
    }
}

/// Scrolling is the only thing the list reacts to; it reports nothing back.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
            }
            _ => {}
        }
        None
    }
}

/// Cached bubble heights, keyed by entry handle so removing the placeholder
/// does not invalidate the entries around it.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// Running bottom edge of each entry, in absolute rows
    pub prefix_heights: Vec<u32>,
    by_handle: HashMap<EntryHandle, u16>,
    content_width: u16,
    full_width: bool,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            by_handle: HashMap::new(),
            content_width: 0,
            full_width: false,
        }
    }

    /// Bring `heights` in line with `entries`. Cached heights are reused
    /// unless the width (or the width cap) changed; removed entries are dropped.
    pub fn sync(&mut self, entries: &[Entry], content_width: u16, full_width: bool) {
        if self.content_width != content_width || self.full_width != full_width {
            self.by_handle.clear();
            self.content_width = content_width;
            self.full_width = full_width;
        }

        let mut fresh = HashMap::with_capacity(entries.len());
        self.heights.clear();
        for entry in entries {
            let height = match self.by_handle.get(&entry.handle) {
                Some(&h) => h,
                None => Bubble::calculate_height(&entry.message, content_width, full_width),
            };
            fresh.insert(entry.handle, height);
            self.heights.push(height);
        }
        self.by_handle = fresh;
        self.rebuild_prefix_heights();
    }

    pub fn cached_entries(&self) -> usize {
        self.by_handle.len()
    }

    pub fn total_height(&self) -> u32 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Absolute row where entry `index` starts.
    pub fn top_of(&self, index: usize) -> u32 {
        if index == 0 {
            0
        } else {
            self.prefix_heights.get(index - 1).copied().unwrap_or(0)
        }
    }

    /// First entry placed on the scroll canvas. Zero unless the transcript
    /// is taller than `u16::MAX` rows; the newest entry is always included.
    pub fn window_start(&self) -> usize {
        let excess = self.total_height().saturating_sub(u32::from(u16::MAX));
        if excess == 0 {
            return 0;
        }
        let straddling = self.prefix_heights.partition_point(|&end| end < excess);
        (straddling + 1).min(self.prefix_heights.len().saturating_sub(1))
    }

    /// Rows on the scroll canvas.
    pub fn canvas_height(&self) -> u16 {
        let base = self.top_of(self.window_start());
        to_row(self.total_height() - base)
    }

    /// Canvas row where entry `index` starts.
    pub fn canvas_top_of(&self, index: usize) -> u16 {
        let base = self.top_of(self.window_start());
        to_row(self.top_of(index).saturating_sub(base))
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u32, |acc, &h| {
                *acc = acc.saturating_add(u32::from(h));
                Some(*acc)
            })
            .collect();
    }

    /// Entries intersecting the canvas viewport, padded by half a screen
    /// either side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let first = self.window_start();
        let base = self.top_of(first);
        let buffer = u32::from(viewport_height / 2);
        let top = base + u32::from(scroll_offset);
        let buffered_start = top.saturating_sub(buffer);
        let buffered_end = top + u32::from(viewport_height) + buffer;

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start)
            .max(first);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}

fn to_row(rows: u32) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Message;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn draw(terminal: &mut Terminal<TestBackend>, state: &mut MessageListState, transcript: &Transcript) {
        terminal
            .draw(|f| {
                let area = f.area();
                MessageList::new(state, transcript, false, 0.0).render(f, area);
            })
            .unwrap();
    }

    #[test]
    fn test_cache_reuses_and_prunes_by_handle() {
        let mut transcript = Transcript::new();
        transcript.append(Message::user("hello"));
        transcript.show_placeholder();

        let mut cache = LayoutCache::new();
        cache.sync(transcript.entries(), 60, false);
        assert_eq!(cache.heights.len(), 2);
        assert_eq!(cache.cached_entries(), 2);

        transcript.remove_placeholder();
        transcript.append(Message::assistant("reply"));
        cache.sync(transcript.entries(), 60, false);
        assert_eq!(cache.heights.len(), 2);
        assert_eq!(cache.cached_entries(), 2, "placeholder height dropped");
    }

    #[test]
    fn test_width_change_remeasures() {
        let mut transcript = Transcript::new();
        transcript.append(Message::assistant("word ".repeat(30)));

        let mut cache = LayoutCache::new();
        cache.sync(transcript.entries(), 100, false);
        let wide = cache.heights[0];
        cache.sync(transcript.entries(), 30, false);
        let narrow = cache.heights[0];

        assert!(narrow > wide);
    }

    #[test]
    fn test_prefix_heights_and_top_of() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![4, 3, 5];
        cache.rebuild_prefix_heights();

        assert_eq!(cache.prefix_heights, vec![4, 7, 12]);
        assert_eq!(cache.total_height(), 12);
        assert_eq!(cache.top_of(0), 0);
        assert_eq!(cache.top_of(2), 7);
    }

    #[test]
    fn test_window_starts_on_entry_boundary() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![40_000, 30_000, 20_000];
        cache.rebuild_prefix_heights();

        // 90_000 rows: the first entry cannot fit alongside the other two
        assert_eq!(cache.window_start(), 1);
        assert_eq!(cache.canvas_height(), 50_000);
        assert_eq!(cache.canvas_top_of(2), 30_000);
        assert_eq!(cache.visible_range(0, 10), 1..2);
    }

    #[test]
    fn test_window_keeps_oversized_last_entry() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![30_000, u16::MAX];
        cache.rebuild_prefix_heights();

        assert_eq!(cache.window_start(), 1);
        assert_eq!(cache.canvas_height(), u16::MAX);
    }

    #[test]
    fn test_visible_range() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![4; 10];
        cache.rebuild_prefix_heights();

        // Viewport rows 20..28, padded to 16..32
        let range = cache.visible_range(20, 8);
        assert_eq!(range, 4..8);
        assert_eq!(cache.visible_range(0, 100), 0..10);
    }

    #[test]
    fn test_newest_entry_visible_after_append() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let mut state = MessageListState::new();
        let mut transcript = Transcript::new();
        for i in 0..8 {
            transcript.append(Message::user(format!("message {i}")));
        }

        draw(&mut terminal, &mut state, &transcript);

        let text = screen_text(&terminal);
        assert!(text.contains("message 7"));
        assert!(!text.contains("message 0"));
        assert!(!state.has_unseen_content);
    }

    #[test]
    fn test_transcript_taller_than_canvas_renders_newest() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let mut state = MessageListState::new();
        let mut transcript = Transcript::new();
        for i in 0..25_000 {
            transcript.append(Message::user(format!("message {i}")));
        }

        draw(&mut terminal, &mut state, &transcript);

        assert!(state.layout.total_height() > u32::from(u16::MAX));
        assert!(screen_text(&terminal).contains("message 24999"));
        assert!(!state.has_unseen_content);
    }

    #[test]
    fn test_scrolled_up_view_repins_on_mutation() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let mut state = MessageListState::new();
        let mut transcript = Transcript::new();
        for i in 0..8 {
            transcript.append(Message::user(format!("message {i}")));
        }
        draw(&mut terminal, &mut state, &transcript);

        // User scrolls to the top; redraw without mutation keeps position
        state.stick_to_bottom = false;
        state.scroll_state.set_offset(Position { x: 0, y: 0 });
        draw(&mut terminal, &mut state, &transcript);
        assert!(screen_text(&terminal).contains("message 0"));
        assert!(state.has_unseen_content);

        transcript.show_placeholder();
        draw(&mut terminal, &mut state, &transcript);

        assert!(state.stick_to_bottom);
        assert!(screen_text(&terminal).contains("typing"));
    }

    #[test]
    fn test_scroll_up_detaches_and_bottom_repins() {
        let mut state = MessageListState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);

        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }
}
