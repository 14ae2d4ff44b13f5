//! Client factory for constructing provider adapters from configuration.
//!
//! Adapters are constructed lazily: a provider that is absent from the
//! fallback chain, or whose credential is missing, gets no client at
//! all. The router treats such providers as "not configured" and skips
//! them without error.

use std::sync::Arc;

use pmo_abstraction::{ProviderClient, ProviderKind};
use tracing::{debug, warn};

use crate::{
    AnthropicClient, CohereClient, GeminiClient, MistralClient, MockClient, OpenAiClient,
};

/// Configuration for one provider entry of the fallback chain.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Which vendor this entry targets.
    pub kind: ProviderKind,
    /// Credential for the vendor; `None` means "listed but not configured".
    pub api_key: Option<String>,
}

impl ProviderConfig {
    /// Creates a new provider configuration.
    #[must_use]
    pub fn new(kind: ProviderKind, api_key: Option<String>) -> Self {
        Self { kind, api_key }
    }
}

/// Factory for creating provider client instances.
pub struct ClientFactory;

impl ClientFactory {
    /// Creates a client for the given configuration.
    ///
    /// Returns `None` when the provider cannot be constructed (missing
    /// credential); the caller is expected to skip such entries rather
    /// than fail.
    pub fn create(config: &ProviderConfig) -> Option<Arc<dyn ProviderClient>> {
        // Mock needs no credential.
        if config.kind == ProviderKind::Mock {
            debug!(provider = %config.kind, "Creating mock client");
            return Some(Arc::new(MockClient::default()));
        }

        let Some(api_key) = config.api_key.clone() else {
            warn!(provider = %config.kind, "Provider listed in chain but has no credential, skipping");
            return None;
        };

        debug!(provider = %config.kind, "Creating provider client");
        let client: Arc<dyn ProviderClient> = match config.kind {
            ProviderKind::OpenAi => Arc::new(OpenAiClient::with_api_key(api_key)),
            ProviderKind::Gemini => Arc::new(GeminiClient::with_api_key(api_key)),
            ProviderKind::Anthropic => Arc::new(AnthropicClient::with_api_key(api_key)),
            ProviderKind::Mistral => Arc::new(MistralClient::with_api_key(api_key)),
            ProviderKind::Cohere => Arc::new(CohereClient::with_api_key(api_key)),
            ProviderKind::Mock => unreachable!("handled above"),
        };
        Some(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_creates_configured_provider() {
        let config = ProviderConfig::new(ProviderKind::OpenAi, Some("key".to_string()));
        let client = ClientFactory::create(&config);
        assert!(client.is_some());
        assert_eq!(client.unwrap().kind(), ProviderKind::OpenAi);
    }

    #[test]
    fn test_factory_skips_missing_credential() {
        let config = ProviderConfig::new(ProviderKind::Cohere, None);
        assert!(ClientFactory::create(&config).is_none());
    }

    #[test]
    fn test_factory_mock_needs_no_credential() {
        let config = ProviderConfig::new(ProviderKind::Mock, None);
        let client = ClientFactory::create(&config);
        assert!(client.is_some());
        assert_eq!(client.unwrap().kind(), ProviderKind::Mock);
    }
}
