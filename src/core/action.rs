//! # Actions
//!
//! Everything that can happen in Lantern becomes an `Action`.
//! User sends a message? That's `Action::Submit(text)`.
//! The collaborator answers? That's `Action::ReplyReady { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` describing the I/O the caller must
//! perform (spawn the collaborator, abort it, quit). No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Session transitions:
//!
//! ```text
//!            Submit(non-blank)
//!   Idle ─────────────────────────▶ AwaitingReply { request }
//!    ▲                                   │
//!    └── ReplyReady / ReplyFailed ───────┤ (matching request only)
//!    └── CancelReply ────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::core::message::Message;
use crate::core::state::{App, Phase, RequestId};
use crate::reply::ReplyError;

pub const FULLSCREEN_ON_STATUS: &str = "Fullscreen (F11 to exit).";
pub const FULLSCREEN_OFF_STATUS: &str = "Exited fullscreen (F11 to toggle).";
pub const AWAITING_STATUS: &str = "Waiting for reply… (Esc to cancel)";
pub const CANCELLED_NOTICE: &str = "Reply cancelled.";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Text handed over by the composer.
    Submit(String),
    ReplyReady { request: RequestId, text: String },
    ReplyFailed { request: RequestId, error: ReplyError },
    CancelReply,
    ClearTranscript,
    ToggleFullscreen,
    Quit,
}

/// Side effects requested by `update()`, performed by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Invoke the collaborator with `text`; report back tagged with `request`.
    SpawnReply { request: RequestId, text: String },
    /// Abort the in-flight collaborator task.
    AbortReply,
}

/// Why a submission did not start a request. Never shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    EmptyInput,
    AwaitingReply,
}

/// Checks whether `text` may start a new request right now.
pub fn check_submission(app: &App, text: &str) -> Result<(), SubmitRejected> {
    if text.trim().is_empty() {
        return Err(SubmitRejected::EmptyInput);
    }
    if app.is_awaiting_reply() {
        return Err(SubmitRejected::AwaitingReply);
    }
    Ok(())
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if let Err(reason) = check_submission(app, &text) {
                debug!("Submission rejected: {:?}", reason);
                return Effect::None;
            }
            let text = text.trim().to_string();
            let request = app.next_request_id();

            app.transcript.append(Message::user(text.clone()));
            app.transcript.show_placeholder();
            app.phase = Phase::AwaitingReply { request };
            app.status_message = AWAITING_STATUS.to_string();

            info!("Idle -> AwaitingReply (request {})", request.value());
            Effect::SpawnReply { request, text }
        }
        Action::ReplyReady { request, text } => {
            if !settle(app, request) {
                return Effect::None;
            }
            app.transcript.append(Message::assistant(text));
            info!("AwaitingReply -> Idle (request {} answered)", request.value());
            Effect::None
        }
        Action::ReplyFailed { request, error } => {
            if !settle(app, request) {
                return Effect::None;
            }
            warn!("Reply for request {} failed: {}", request.value(), error);
            app.transcript
                .append(Message::system(format!("Reply failed: {error}")));
            Effect::None
        }
        Action::CancelReply => {
            let Some(request) = app.pending_request() else {
                return Effect::None;
            };
            settle(app, request);
            app.transcript.append(Message::system(CANCELLED_NOTICE));
            info!("AwaitingReply -> Idle (request {} cancelled)", request.value());
            Effect::AbortReply
        }
        Action::ClearTranscript => {
            if app.is_awaiting_reply() {
                debug!("Clear ignored while awaiting a reply");
                return Effect::None;
            }
            app.transcript.clear();
            Effect::None
        }
        Action::ToggleFullscreen => {
            app.fullscreen = !app.fullscreen;
            app.status_message = if app.fullscreen {
                FULLSCREEN_ON_STATUS
            } else {
                FULLSCREEN_OFF_STATUS
            }
            .to_string();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Leaves AwaitingReply if `request` is the one being awaited.
/// Returns false for stale completions, which change nothing.
fn settle(app: &mut App, request: RequestId) -> bool {
    if app.pending_request() != Some(request) {
        debug!("Dropping stale completion for request {}", request.value());
        return false;
    }
    app.transcript.remove_placeholder();
    app.phase = Phase::Idle;
    app.status_message = app.status_text.clone();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;
    use crate::test_support::test_app;

    fn submit(app: &mut App, text: &str) -> Option<RequestId> {
        match update(app, Action::Submit(text.to_string())) {
            Effect::SpawnReply { request, .. } => Some(request),
            _ => None,
        }
    }

    #[test]
    fn blank_submission_is_ignored() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Submit("   \n".into())), Effect::None);
        assert!(app.transcript.is_empty());
        assert_eq!(app.phase, Phase::Idle);
    }

    #[test]
    fn submit_appends_user_and_placeholder() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("hello".into()));

        let Effect::SpawnReply { request, text } = effect else {
            panic!("expected SpawnReply, got {effect:?}");
        };
        assert_eq!(text, "hello");
        assert_eq!(app.phase, Phase::AwaitingReply { request });

        let entries = app.transcript.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message.role, Role::User);
        assert_eq!(entries[0].message.text, "hello");
        assert!(entries[1].message.is_placeholder);
        assert_eq!(app.status_message, AWAITING_STATUS);
    }

    #[test]
    fn reply_replaces_placeholder() {
        let mut app = test_app();
        let request = submit(&mut app, "hello").unwrap();

        update(
            &mut app,
            Action::ReplyReady {
                request,
                text: "(echo) You said: hello".into(),
            },
        );

        assert_eq!(app.phase, Phase::Idle);
        assert_eq!(app.transcript.len(), 2);
        assert_eq!(app.transcript.placeholder_count(), 0);
        let last = &app.transcript.entries()[1].message;
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.text, "(echo) You said: hello");
        assert_eq!(app.status_message, app.status_text);
    }

    #[test]
    fn second_submission_rejected_while_awaiting() {
        let mut app = test_app();
        submit(&mut app, "first").unwrap();
        let len = app.transcript.len();

        assert_eq!(update(&mut app, Action::Submit("second".into())), Effect::None);
        assert_eq!(app.transcript.len(), len);
        assert_eq!(
            check_submission(&app, "second"),
            Err(SubmitRejected::AwaitingReply)
        );
    }

    #[test]
    fn failure_surfaces_error_entry() {
        let mut app = test_app();
        let request = submit(&mut app, "hello").unwrap();

        update(
            &mut app,
            Action::ReplyFailed {
                request,
                error: ReplyError::Failed("model crashed".into()),
            },
        );

        assert_eq!(app.phase, Phase::Idle);
        assert_eq!(app.transcript.placeholder_count(), 0);
        let last = &app.transcript.entries().last().unwrap().message;
        assert_eq!(last.role, Role::System);
        assert_eq!(last.text, "Reply failed: model crashed");
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut app = test_app();
        let first = submit(&mut app, "first").unwrap();
        update(&mut app, Action::CancelReply);
        let second = submit(&mut app, "second").unwrap();
        let len = app.transcript.len();

        update(
            &mut app,
            Action::ReplyReady {
                request: first,
                text: "late".into(),
            },
        );

        assert_eq!(app.transcript.len(), len);
        assert_eq!(app.phase, Phase::AwaitingReply { request: second });
        assert_eq!(app.transcript.placeholder_count(), 1);
    }

    #[test]
    fn cancel_returns_to_idle_and_requests_abort() {
        let mut app = test_app();
        submit(&mut app, "hello").unwrap();

        assert_eq!(update(&mut app, Action::CancelReply), Effect::AbortReply);
        assert_eq!(app.phase, Phase::Idle);
        assert_eq!(app.transcript.placeholder_count(), 0);
        let last = &app.transcript.entries().last().unwrap().message;
        assert_eq!(last.text, CANCELLED_NOTICE);
    }

    #[test]
    fn cancel_while_idle_is_noop() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::CancelReply), Effect::None);
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn clear_only_while_idle() {
        let mut app = test_app();
        let request = submit(&mut app, "hello").unwrap();

        update(&mut app, Action::ClearTranscript);
        assert_eq!(app.transcript.len(), 2);

        update(
            &mut app,
            Action::ReplyReady {
                request,
                text: "hi".into(),
            },
        );
        update(&mut app, Action::ClearTranscript);
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn toggle_fullscreen_updates_status() {
        let mut app = test_app();
        update(&mut app, Action::ToggleFullscreen);
        assert!(app.fullscreen);
        assert_eq!(app.status_message, FULLSCREEN_ON_STATUS);

        update(&mut app, Action::ToggleFullscreen);
        assert!(!app.fullscreen);
        assert_eq!(app.status_message, FULLSCREEN_OFF_STATUS);
    }

    #[test]
    fn quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
