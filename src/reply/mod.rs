//! # Reply Collaborators
//!
//! Anything that turns submitted user text into an assistant reply.
//! The session controller only sees the [`ReplyProvider`] trait; the
//! echo provider is the stand-in until a real model backend exists.

pub mod echo;
pub mod provider;

pub use echo::{DEFAULT_ECHO_DELAY, DEFAULT_ECHO_PREFIX, EchoProvider};
pub use provider::{ReplyError, ReplyProvider, produce_with_timeout};
