//! Fixed-latency echo collaborator.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use super::provider::{ReplyError, ReplyProvider};

pub const DEFAULT_ECHO_DELAY: Duration = Duration::from_millis(300);
pub const DEFAULT_ECHO_PREFIX: &str = "(echo) You said: ";

/// Waits `delay`, then answers with `prefix + text`.
pub struct EchoProvider {
    delay: Duration,
    prefix: String,
}

impl Default for EchoProvider {
    fn default() -> Self {
        Self::new(DEFAULT_ECHO_DELAY, DEFAULT_ECHO_PREFIX)
    }
}

impl EchoProvider {
    pub fn new(delay: Duration, prefix: impl Into<String>) -> Self {
        Self {
            delay,
            prefix: prefix.into(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl ReplyProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    async fn produce_reply(&self, text: &str) -> Result<String, ReplyError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        debug!("Echoing {} bytes after {:?}", text.len(), self.delay);
        Ok(format!("{}{}", self.prefix, text))
    }
}
