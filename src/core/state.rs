//! # Application State
//!
//! Core business state for Lantern. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn ReplyProvider>  // reply collaborator
//! ├── transcript: Transcript            // conversation entries
//! ├── phase: Phase                      // Idle | AwaitingReply
//! ├── window_title: String              // title bar text
//! ├── status_text: String               // resting status line text
//! ├── status_message: String            // current status line text
//! ├── fullscreen: bool                  // chrome hidden
//! └── reply_timeout: Duration           // deadline per reply (0 = none)
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;
use std::time::Duration;

use crate::core::config::ResolvedConfig;
use crate::core::message::Message;
use crate::core::transcript::Transcript;
use crate::reply::ReplyProvider;

/// Identifies one collaborator invocation. Completions carrying an id other
/// than the one currently awaited are stale and get dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Session controller state. At most one reply is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingReply { request: RequestId },
}

pub struct App {
    pub provider: Arc<dyn ReplyProvider>,
    pub transcript: Transcript,
    pub phase: Phase,
    pub window_title: String,
    pub status_text: String,
    pub status_message: String,
    pub fullscreen: bool,
    pub reply_timeout: Duration,
    next_request: u64,
}

impl App {
    pub fn new(provider: Arc<dyn ReplyProvider>) -> Self {
        Self::from_config(provider, &ResolvedConfig {
            welcome_message: None,
            ..ResolvedConfig::default()
        })
    }

    /// Builds the session from resolved config, posting the welcome message
    /// if one is configured.
    pub fn from_config(provider: Arc<dyn ReplyProvider>, config: &ResolvedConfig) -> Self {
        let mut transcript = Transcript::new();
        if let Some(welcome) = &config.welcome_message {
            transcript.append(Message::system(welcome.clone()));
        }

        Self {
            provider,
            transcript,
            phase: Phase::Idle,
            window_title: config.window_title.clone(),
            status_text: config.status_text.clone(),
            status_message: config.status_text.clone(),
            fullscreen: false,
            reply_timeout: config.reply_timeout,
            next_request: 0,
        }
    }

    pub fn is_awaiting_reply(&self) -> bool {
        matches!(self.phase, Phase::AwaitingReply { .. })
    }

    /// The request currently awaited, if any.
    pub fn pending_request(&self) -> Option<RequestId> {
        match self.phase {
            Phase::AwaitingReply { request } => Some(request),
            Phase::Idle => None,
        }
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }
}
