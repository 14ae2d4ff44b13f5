//! OpenAI provider client implementation.
//!
//! Translates the uniform `(model, prompt)` call into OpenAI's chat
//! completion API shape.

use async_trait::async_trait;
use pmo_abstraction::{Completion, ProviderClient, ProviderError, ProviderKind, TokenUsage};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// OpenAI provider client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    /// The API key for authentication.
    api_key: String,
    /// The base URL for the OpenAI API.
    base_url: String,
    /// HTTP client for making requests.
    client: Client,
}

impl OpenAiClient {
    /// Creates a new `OpenAiClient` owning the given API key.
    ///
    /// # Arguments
    /// * `api_key` - The API key for authentication
    #[must_use]
    pub fn with_api_key(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
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

/// OpenAI API request structure.
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
}

/// OpenAI API message structure.
#[derive(Debug, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

/// OpenAI API response structure.
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    model: Option<String>,
    usage: Option<OpenAiUsage>,
}

/// OpenAI API choice structure.
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

/// OpenAI API usage structure.
#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[async_trait]
impl ProviderClient for OpenAiClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<Completion, ProviderError> {
        debug!(model = %model, prompt_len = prompt.len(), "OpenAiClient sending completion");

        let url = format!("{}/chat/completions", self.base_url);
        let request = OpenAiRequest {
            model: model.to_string(),
            messages: vec![OpenAiMessage { role: "user".to_string(), content: prompt.to_string() }],
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestError(format!("OpenAI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text =
                response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::ApiError(format!(
                "OpenAI API error ({status}): {error_text}"
            )));
        }

        let body: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(format!("OpenAI response: {e}")))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ParseError("OpenAI response had no choices".to_string()))?;

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

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_openai_complete_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [{"message": {"role": "assistant", "content": "Hello there"}}],
                    "model": "gpt-4",
                    "usage": {"prompt_tokens": 3, "completion_tokens": 2, "total_tokens": 5}
                }"#,
            )
            .create_async()
            .await;

        let client =
            OpenAiClient::with_api_key("test-key".to_string()).with_base_url(server.url());
        let completion = client.complete("gpt-4", "hi").await.unwrap();

        assert_eq!(completion.content, "Hello there");
        assert_eq!(completion.model.as_deref(), Some("gpt-4"));
        assert_eq!(completion.usage.unwrap().total_tokens, 5);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_openai_complete_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error": "rate limited"}"#)
            .create_async()
            .await;

        let client =
            OpenAiClient::with_api_key("test-key".to_string()).with_base_url(server.url());
        let result = client.complete("gpt-4", "hi").await;

        match result.unwrap_err() {
            ProviderError::ApiError(msg) => assert!(msg.contains("429")),
            other => panic!("Expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_openai_complete_empty_choices() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let client =
            OpenAiClient::with_api_key("test-key".to_string()).with_base_url(server.url());
        let result = client.complete("gpt-4", "hi").await;

        assert!(matches!(result.unwrap_err(), ProviderError::ParseError(_)));
    }
}
