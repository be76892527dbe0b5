use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

/// Errors that can occur while producing a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyError {
    /// The collaborator itself reported a failure.
    Failed(String),
    /// No reply within the configured deadline.
    Timeout(Duration),
}

impl fmt::Display for ReplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyError::Failed(msg) => write!(f, "{msg}"),
            ReplyError::Timeout(after) => {
                write!(f, "no reply after {}ms", after.as_millis())
            }
        }
    }
}

impl std::error::Error for ReplyError {}

/// Produces one reply per invocation.
///
/// Implementations must resolve exactly once per call. Long-running work
/// (model inference, network) belongs inside the future; the caller runs it
/// off the UI loop and marshals the result back.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Turns the submitted text into reply text.
    async fn produce_reply(&self, text: &str) -> Result<String, ReplyError>;
}

/// Runs `provider` with a deadline. A `timeout` of zero disables the deadline.
pub async fn produce_with_timeout(
    provider: &dyn ReplyProvider,
    text: &str,
    timeout: Duration,
) -> Result<String, ReplyError> {
    if timeout.is_zero() {
        return provider.produce_reply(text).await;
    }
    match tokio::time::timeout(timeout, provider.produce_reply(text)).await {
        Ok(result) => result,
        Err(_) => Err(ReplyError::Timeout(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingProvider, StalledProvider};

    #[test]
    fn display_messages() {
        assert_eq!(ReplyError::Failed("boom".into()).to_string(), "boom");
        assert_eq!(
            ReplyError::Timeout(Duration::from_millis(250)).to_string(),
            "no reply after 250ms"
        );
    }

    #[tokio::test]
    async fn timeout_fires_for_stalled_provider() {
        let result =
            produce_with_timeout(&StalledProvider, "hi", Duration::from_millis(20)).await;
        assert_eq!(result, Err(ReplyError::Timeout(Duration::from_millis(20))));
    }

    #[tokio::test]
    async fn provider_errors_pass_through() {
        let provider = FailingProvider::new("backend offline");
        let result = produce_with_timeout(&provider, "hi", Duration::from_secs(1)).await;
        assert_eq!(result, Err(ReplyError::Failed("backend offline".into())));
    }
}
