use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, SEND_BUTTON_WIDTH, SendButton, StatusLine, TitleBar};
use crate::tui::theme;

/// Where each piece of chrome goes for a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// `None` in fullscreen mode
    pub title: Option<Rect>,
    pub transcript: Rect,
    pub input: Rect,
    pub send_button: Rect,
    pub status: Rect,
}

/// Splits the frame. Shared by drawing and mouse hit testing so both agree.
pub fn layout_areas(area: Rect, input_height: u16, fullscreen: bool) -> ScreenAreas {
    use Constraint::{Length, Min};

    let title_height = if fullscreen { 0 } else { 1 };
    let [title, transcript, input_row, status] =
        Layout::vertical([Length(title_height), Min(0), Length(input_height), Length(1)])
            .areas(area);
    let [input, send_button] =
        Layout::horizontal([Min(0), Length(SEND_BUTTON_WIDTH)]).areas(input_row);

    ScreenAreas {
        title: (!fullscreen).then_some(title),
        transcript,
        input,
        send_button,
        status,
    }
}

/// Width the composer gets in a frame `frame_width` columns wide.
pub fn input_width(frame_width: u16) -> u16 {
    frame_width.saturating_sub(SEND_BUTTON_WIDTH)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::WINDOW_BG)),
        frame.area(),
    );
    let areas = layout_areas(frame.area(), tui.input_box.height(), app.fullscreen);

    // Transcript first: it decides whether unseen content sits below
    MessageList::new(
        &mut tui.message_list,
        &app.transcript,
        app.fullscreen,
        tui.pulse_value,
    )
    .render(frame, areas.transcript);

    if let Some(title_area) = areas.title {
        TitleBar::new(
            app.window_title.clone(),
            app.status_text.clone(),
            tui.message_list.has_unseen_content,
        )
        .render(frame, title_area);
    }

    tui.input_box.render(frame, areas.input);
    SendButton::new(!app.is_awaiting_reply()).render(frame, areas.send_button);
    StatusLine::new(&app.status_message, app.is_awaiting_reply()).render(frame, areas.status);
}

/// Hit test: is the screen cell `(column, row)` on the Send button?
pub fn hit_test_send_button(
    column: u16,
    row: u16,
    frame_area: Rect,
    input_height: u16,
    fullscreen: bool,
) -> bool {
    let areas = layout_areas(frame_area, input_height, fullscreen);
    SendButton::contains(areas.send_button, column, row)
}
