//! Provider abstraction layer for PMO360.
//!
//! This crate defines the uniform contract every LLM vendor adapter
//! implements, plus the shared request/response types.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents an error that can occur when calling an LLM provider.
///
/// Adapters do not classify failures beyond these coarse buckets; retry
/// and fallback decisions belong to the router, not the adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS).
    #[error("Request error: {0}")]
    RequestError(String),

    /// The provider returned a non-success status (auth, quota, bad input).
    #[error("Provider API error: {0}")]
    ApiError(String),

    /// The provider response could not be parsed into the expected shape.
    #[error("Response parse error: {0}")]
    ParseError(String),

    /// The adapter has no credential configured for this provider.
    #[error("Missing credential for provider '{0}'")]
    MissingCredential(String),

    /// Other unexpected errors.
    #[error("Provider error: {0}")]
    Other(String),
}

/// Identity of an LLM vendor supported by the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completion API.
    OpenAi,
    /// Google Gemini generateContent API.
    Gemini,
    /// Anthropic messages API.
    Anthropic,
    /// Mistral chat completion API.
    Mistral,
    /// Cohere generate API.
    Cohere,
    /// Mock provider for testing.
    Mock,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProviderKind {
    /// Canonical lowercase name, matching the configuration format.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Mistral => "mistral",
            ProviderKind::Cohere => "cohere",
            ProviderKind::Mock => "mock",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" | "google" => Ok(Self::Gemini),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "mistral" => Ok(Self::Mistral),
            "cohere" => Ok(Self::Cohere),
            "mock" => Ok(Self::Mock),
            other => Err(ProviderError::Other(format!("Unknown provider: {other}"))),
        }
    }
}

/// Token usage reported by a provider, when available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt.
    pub prompt_tokens: u32,

    /// Number of tokens in the completion.
    pub completion_tokens: u32,

    /// Total number of tokens used.
    pub total_tokens: u32,
}

/// The response from a single provider completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// Raw text of the top completion.
    pub content: String,

    /// The model that produced the response, as reported by the provider.
    pub model: Option<String>,

    /// Usage statistics, if the provider reports them.
    pub usage: Option<TokenUsage>,
}

impl Completion {
    /// Creates a completion carrying only text.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self { content: content.into(), model: None, usage: None }
    }
}

/// Uniform client contract implemented by every vendor adapter.
///
/// Adapters translate `(model, prompt)` into one vendor's native call
/// shape and return the raw text of the top completion. They must not
/// retry internally.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Returns which vendor this client talks to.
    fn kind(&self) -> ProviderKind;

    /// Sends a single completion request.
    ///
    /// # Errors
    /// Returns a `ProviderError` on any failure; the error is not
    /// interpreted further by the caller beyond "this attempt failed".
    async fn complete(&self, model: &str, prompt: &str) -> Result<Completion, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_round_trip() {
        for kind in [
            ProviderKind::OpenAi,
            ProviderKind::Gemini,
            ProviderKind::Anthropic,
            ProviderKind::Mistral,
            ProviderKind::Cohere,
            ProviderKind::Mock,
        ] {
            assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_provider_kind_aliases() {
        assert_eq!("claude".parse::<ProviderKind>().unwrap(), ProviderKind::Anthropic);
        assert_eq!("google".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert_eq!("OpenAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
    }

    #[test]
    fn test_provider_kind_unknown() {
        assert!("huggingface".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_completion_text() {
        let completion = Completion::text("hello");
        assert_eq!(completion.content, "hello");
        assert!(completion.model.is_none());
        assert!(completion.usage.is_none());
    }
}
