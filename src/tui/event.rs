use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use log::warn;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Session actions (passed to core::update)
    Quit,
    Submit,
    Escape,
    ToggleFullscreen,
    ClearTranscript,

    // Composer editing
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,

    // Transcript scrolling
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToBottom, // Ctrl+End - also re-enables stick-to-bottom

    MouseClick(u16, u16),
    Resize,
}

/// Poll for an event with the given timeout
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(ev) => map_event(ev),
        Err(e) => {
            warn!("Event read failed: {}", e);
            None
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

fn map_event(ev: Event) -> Option<TuiEvent> {
    match ev {
        Event::Key(key_event) => map_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

pub(crate) fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Keyboard enhancement reports releases too; only presses and repeats count
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        // Ctrl+Enter submits. Legacy terminals send Ctrl+J for it, Ctrl+S always works
        KeyCode::Enter if ctrl => Some(TuiEvent::Submit),
        KeyCode::Char('j') | KeyCode::Char('s') if ctrl => Some(TuiEvent::Submit),
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => Some(TuiEvent::Quit),
        KeyCode::Char('l') if ctrl => Some(TuiEvent::ClearTranscript),
        KeyCode::End if ctrl => Some(TuiEvent::ScrollToBottom),
        // Plain Enter is a line break, never a submission
        KeyCode::Enter => Some(TuiEvent::InputChar('\n')),
        KeyCode::F(11) => Some(TuiEvent::ToggleFullscreen),
        KeyCode::Char(c) if !ctrl => Some(TuiEvent::InputChar(c)),
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Delete => Some(TuiEvent::Delete),
        KeyCode::Esc => Some(TuiEvent::Escape),
        KeyCode::Left => Some(TuiEvent::CursorLeft),
        KeyCode::Right => Some(TuiEvent::CursorRight),
        KeyCode::Up => Some(TuiEvent::CursorUp),
        KeyCode::Down => Some(TuiEvent::CursorDown),
        KeyCode::Home => Some(TuiEvent::CursorHome),
        KeyCode::End => Some(TuiEvent::CursorEnd),
        KeyCode::PageUp => Some(TuiEvent::ScrollPageUp),
        KeyCode::PageDown => Some(TuiEvent::ScrollPageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_enter_inserts_newline() {
        assert_eq!(
            map_key(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(TuiEvent::InputChar('\n'))
        );
    }

    #[test]
    fn submit_chords() {
        assert_eq!(
            map_key(key(KeyCode::Enter, KeyModifiers::CONTROL)),
            Some(TuiEvent::Submit)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Submit)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Submit)
        );
    }

    #[test]
    fn f11_toggles_fullscreen() {
        assert_eq!(
            map_key(key(KeyCode::F(11), KeyModifiers::NONE)),
            Some(TuiEvent::ToggleFullscreen)
        );
    }

    #[test]
    fn shifted_chars_are_typed() {
        assert_eq!(
            map_key(key(KeyCode::Char('H'), KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('H'))
        );
    }

    #[test]
    fn unbound_ctrl_chars_are_dropped() {
        assert_eq!(map_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn key_release_ignored() {
        let mut ev = key(KeyCode::Char('a'), KeyModifiers::NONE);
        ev.kind = KeyEventKind::Release;
        assert_eq!(map_key(ev), None);
    }

    #[test]
    fn left_click_maps_to_mouse_click() {
        let ev = Event::Mouse(crossterm::event::MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(ev), Some(TuiEvent::MouseClick(12, 4)));
    }
}
