//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::reply::{ReplyError, ReplyProvider};

/// Answers immediately with an empty reply.
pub struct NoopProvider;

#[async_trait]
impl ReplyProvider for NoopProvider {
    fn name(&self) -> &str {
        "noop"
    }

    async fn produce_reply(&self, _text: &str) -> Result<String, ReplyError> {
        Ok(String::new())
    }
}

/// Always fails with the given reason.
pub struct FailingProvider {
    reason: String,
}

impl FailingProvider {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl ReplyProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn produce_reply(&self, _text: &str) -> Result<String, ReplyError> {
        Err(ReplyError::Failed(self.reason.clone()))
    }
}

/// Never resolves.
pub struct StalledProvider;

#[async_trait]
impl ReplyProvider for StalledProvider {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn produce_reply(&self, _text: &str) -> Result<String, ReplyError> {
        std::future::pending().await
    }
}

/// Creates a test App with a NoopProvider and no welcome message.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopProvider))
}
