//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! One loop owns `App` and `TuiState`. Each turn it:
//!
//! 1. re-measures the composer for the current terminal width,
//! 2. draws if anything changed,
//! 3. drains terminal events,
//! 4. drains actions sent back by reply tasks.
//!
//! Reply tasks run on the tokio runtime and report through a
//! `std::sync::mpsc` channel, so state is only ever touched here.
//!
//! ## Redraw Strategy
//!
//! - **Awaiting a reply**: draws every ~80ms so the placeholder border pulses.
//! - **Idle**: sleeps up to 500ms and only redraws on events or resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::composer::HeightBounds;
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, RequestId};
use crate::reply::{EchoProvider, ReplyProvider, produce_with_timeout};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input_box: InputBox,
    // Animation state
    pub pulse_value: f32,
}

impl TuiState {
    pub fn new(bounds: HeightBounds) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(bounds),
            pulse_value: 0.0,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Ctrl+Enter arrive as itself; terminals
        // without it ignore the request and the Ctrl+J / Ctrl+S chords remain
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the reply collaborator from resolved config.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn ReplyProvider> {
    Arc::new(EchoProvider::new(
        config.echo_delay,
        config.echo_prefix.clone(),
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    info!(
        "Starting session with '{}' provider (timeout {:?})",
        provider.name(),
        config.reply_timeout
    );
    let mut app = App::from_config(provider, &config);
    let mut tui = TuiState::new(config.composer_bounds);

    let mut terminal = ratatui::init();
    let guard = TerminalModeGuard::new();
    if let Err(e) = &guard {
        warn!("Could not enable terminal modes: {}", e);
    }

    let result = event_loop(&mut terminal, &mut app, &mut tui);

    drop(guard);
    ratatui::restore();
    result
}

/// Who currently runs the reply task, so Esc can abort it.
#[derive(Default)]
struct ReplyTask {
    abort: Option<AbortHandle>,
}

impl ReplyTask {
    fn abort(&mut self) {
        if let Some(handle) = self.abort.take() {
            handle.abort();
        }
    }
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut reply_task = ReplyTask::default();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let size = terminal.size()?;
        let frame_area = Rect::new(0, 0, size.width, size.height);

        // Composer height follows the width, so a resize can change it
        if let Some(height) = tui.input_box.measure(ui::input_width(frame_area.width)) {
            debug!("Composer height -> {}", height);
            needs_redraw = true;
        }
        tui.input_box.composer.set_locked(app.is_awaiting_reply());

        let animating = app.is_awaiting_reply();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 5.0).sin() * 0.5 + 0.5;
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match route_event(event, app, tui, frame_area) {
                Some(action) => action,
                None => continue,
            };
            if dispatch(action, app, tui, &tx, &mut reply_task) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle actions sent back by reply tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(action, app, tui, &tx, &mut reply_task) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    reply_task.abort();
    info!("Event loop finished");
    Ok(())
}

/// Turn one terminal event into a session action, handling anything that is
/// purely presentational (editing, scrolling) on the spot.
fn route_event(
    event: TuiEvent,
    app: &App,
    tui: &mut TuiState,
    frame_area: Rect,
) -> Option<Action> {
    match event {
        TuiEvent::Resize => None,
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::Escape => app.is_awaiting_reply().then_some(Action::CancelReply),
        TuiEvent::ToggleFullscreen => Some(Action::ToggleFullscreen),
        TuiEvent::ClearTranscript => Some(Action::ClearTranscript),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(&event);
            None
        }
        // Arrow keys scroll the transcript while there is nothing to edit
        TuiEvent::CursorUp if tui.input_box.draft().is_empty() => {
            tui.message_list.handle_event(&TuiEvent::ScrollUp);
            None
        }
        TuiEvent::CursorDown if tui.input_box.draft().is_empty() => {
            tui.message_list.handle_event(&TuiEvent::ScrollDown);
            None
        }
        TuiEvent::MouseClick(column, row) => {
            let on_send = ui::hit_test_send_button(
                column,
                row,
                frame_area,
                tui.input_box.height(),
                app.fullscreen,
            );
            if on_send {
                debug!("Send button clicked");
                submit_from_composer(tui, &TuiEvent::Submit)
            } else {
                None
            }
        }
        other => submit_from_composer(tui, &other),
    }
}

fn submit_from_composer(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match tui.input_box.handle_event(event)? {
        InputEvent::Submit(text) => Some(Action::Submit(text)),
        InputEvent::HeightChanged(height) => {
            debug!("Composer height -> {}", height);
            None
        }
        InputEvent::ContentChanged => None,
    }
}

/// Apply `action` and perform the effect it asks for. Returns true to quit.
fn dispatch(
    action: Action,
    app: &mut App,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
    reply_task: &mut ReplyTask,
) -> bool {
    let effect = update(app, action);
    tui.input_box.composer.set_locked(app.is_awaiting_reply());

    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::SpawnReply { request, text } => {
            reply_task.abort();
            reply_task.abort = Some(spawn_reply(app, request, text, tx.clone()));
            false
        }
        Effect::AbortReply => {
            reply_task.abort();
            false
        }
    }
}

fn spawn_reply(
    app: &App,
    request: RequestId,
    text: String,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!(
        "Spawning reply for request {} via '{}'",
        request.value(),
        app.provider.name()
    );

    let provider = app.provider.clone();
    let timeout = app.reply_timeout;

    let handle = tokio::spawn(async move {
        let started = Instant::now();
        let action = match produce_with_timeout(provider.as_ref(), &text, timeout).await {
            Ok(text) => Action::ReplyReady { request, text },
            Err(error) => Action::ReplyFailed { request, error },
        };
        debug!(
            "Request {} settled after {}ms",
            request.value(),
            started.elapsed().as_millis()
        );
        if tx.send(action).is_err() {
            warn!(
                "Failed to deliver reply for request {}: receiver dropped",
                request.value()
            );
        }
    });

    handle.abort_handle()
}
