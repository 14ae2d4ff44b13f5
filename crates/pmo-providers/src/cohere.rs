//! Cohere provider client implementation.

use async_trait::async_trait;
use pmo_abstraction::{Completion, ProviderClient, ProviderError, ProviderKind};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cohere provider client.
#[derive(Debug, Clone)]
pub struct CohereClient {
    /// The API key for authentication.
    api_key: String,
    /// The base URL for the Cohere API.
    base_url: String,
    /// HTTP client for making requests.
    client: Client,
}

impl CohereClient {
    /// Creates a new `CohereClient` owning the given API key.
    #[must_use]
    pub fn with_api_key(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api.cohere.com/v1".to_string(),
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

/// Cohere API request structure.
#[derive(Debug, Serialize)]
struct CohereRequest {
    model: String,
    prompt: String,
}

/// Cohere API response structure.
#[derive(Debug, Deserialize)]
struct CohereResponse {
    generations: Vec<CohereGeneration>,
}

/// Cohere API generation structure.
#[derive(Debug, Deserialize)]
struct CohereGeneration {
    text: String,
}

#[async_trait]
impl ProviderClient for CohereClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Cohere
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<Completion, ProviderError> {
        debug!(model = %model, prompt_len = prompt.len(), "CohereClient sending completion");

        let url = format!("{}/generate", self.base_url);
        let request = CohereRequest { model: model.to_string(), prompt: prompt.to_string() };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestError(format!("Cohere request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text =
                response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::ApiError(format!(
                "Cohere API error ({status}): {error_text}"
            )));
        }

        let body: CohereResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Cohere response: {e}")))?;

        let generation = body.generations.into_iter().next().ok_or_else(|| {
            ProviderError::ParseError("Cohere response had no generations".to_string())
        })?;

        Ok(Completion { content: generation.text, model: Some(model.to_string()), usage: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cohere_complete_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"generations": [{"text": "Cohere says hi"}]}"#)
            .create_async()
            .await;

        let client =
            CohereClient::with_api_key("test-key".to_string()).with_base_url(server.url());
        let completion = client.complete("command", "hi").await.unwrap();

        assert_eq!(completion.content, "Cohere says hi");
    }

    #[tokio::test]
    async fn test_cohere_complete_no_generations() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"generations": []}"#)
            .create_async()
            .await;

        let client =
            CohereClient::with_api_key("test-key".to_string()).with_base_url(server.url());
        let result = client.complete("command", "hi").await;

        assert!(matches!(result.unwrap_err(), ProviderError::ParseError(_)));
    }
}
