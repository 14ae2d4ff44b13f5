//! Mock provider client for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pmo_abstraction::{Completion, ProviderClient, ProviderError, ProviderKind};
use tracing::debug;

/// Mock provider client for tests and development.
///
/// Returns a canned reply (or a canned failure) and counts how many
/// times it was called, which lets tests assert short-circuit and
/// dry-run behavior.
#[derive(Debug)]
pub struct MockClient {
    /// Canned reply returned on success.
    reply: String,
    /// Canned failure; when set, every call fails with this detail.
    failure: Option<String>,
    /// Number of times `complete` was invoked.
    calls: AtomicUsize,
}

impl MockClient {
    /// Creates a mock client that always succeeds with the given reply.
    #[must_use]
    pub fn replying(reply: impl Into<String>) -> Self {
        Self { reply: reply.into(), failure: None, calls: AtomicUsize::new(0) }
    }

    /// Creates a mock client that always fails with the given detail.
    #[must_use]
    pub fn failing(detail: impl Into<String>) -> Self {
        Self { reply: String::new(), failure: Some(detail.into()), calls: AtomicUsize::new(0) }
    }

    /// Returns how many times `complete` was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::replying("mock reply")
    }
}

#[async_trait]
impl ProviderClient for MockClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Mock
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<Completion, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(model = %model, prompt_len = prompt.len(), "MockClient completing");

        match &self.failure {
            Some(detail) => Err(ProviderError::Other(detail.clone())),
            None => Ok(Completion {
                content: self.reply.clone(),
                model: Some(model.to_string()),
                usage: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replying() {
        let client = MockClient::replying("OK");
        let completion = client.complete("mock-model", "hello").await.unwrap();
        assert_eq!(completion.content, "OK");
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_failing() {
        let client = MockClient::failing("boom");
        let result = client.complete("mock-model", "hello").await;
        match result.unwrap_err() {
            ProviderError::Other(detail) => assert_eq!(detail, "boom"),
            other => panic!("Expected Other, got {other:?}"),
        }
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_call_count() {
        let client = MockClient::default();
        for _ in 0..3 {
            client.complete("mock-model", "hi").await.unwrap();
        }
        assert_eq!(client.calls(), 3);
    }
}
