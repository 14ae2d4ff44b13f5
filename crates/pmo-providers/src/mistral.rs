//! Mistral provider client implementation.
//!
//! Mistral exposes an OpenAI-compatible chat completion endpoint, so the
//! wire shapes mirror the OpenAI adapter with Mistral's host and paths.

use async_trait::async_trait;
use pmo_abstraction::{Completion, ProviderClient, ProviderError, ProviderKind, TokenUsage};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Mistral provider client.
#[derive(Debug, Clone)]
pub struct MistralClient {
    /// The API key for authentication.
    api_key: String,
    /// The base URL for the Mistral API.
    base_url: String,
    /// HTTP client for making requests.
    client: Client,
}

impl MistralClient {
    /// Creates a new `MistralClient` owning the given API key.
    #[must_use]
    pub fn with_api_key(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api.mistral.ai/v1".to_string(),
            client: Client::new(),
        }
    }

    /// Overrides the base URL (used for tests against a mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

/// Mistral API request structure.
#[derive(Debug, Serialize)]
struct MistralRequest {
    model: String,
    messages: Vec<MistralMessage>,
}

/// Mistral API message structure.
#[derive(Debug, Serialize, Deserialize)]
struct MistralMessage {
    role: String,
    content: String,
}

/// Mistral API response structure.
#[derive(Debug, Deserialize)]
struct MistralResponse {
    choices: Vec<MistralChoice>,
    model: Option<String>,
    usage: Option<MistralUsage>,
}

/// Mistral API choice structure.
#[derive(Debug, Deserialize)]
struct MistralChoice {
    message: MistralMessage,
}

/// Mistral API usage structure.
#[derive(Debug, Deserialize)]
struct MistralUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[async_trait]
impl ProviderClient for MistralClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Mistral
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<Completion, ProviderError> {
        debug!(model = %model, prompt_len = prompt.len(), "MistralClient sending completion");

        let url = format!("{}/chat/completions", self.base_url);
        let request = MistralRequest {
            model: model.to_string(),
            messages: vec![MistralMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestError(format!("Mistral request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text =
                response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::ApiError(format!(
                "Mistral API error ({status}): {error_text}"
            )));
        }

        let body: MistralResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Mistral response: {e}")))?;

        let choice = body.choices.into_iter().next().ok_or_else(|| {
            ProviderError::ParseError("Mistral response had no choices".to_string())
        })?;

        Ok(Completion {
            content: choice.message.content,
            model: body.model,
            usage: body.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}
