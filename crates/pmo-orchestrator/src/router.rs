//! Provider fallback router.
//!
//! The router owns an ordered chain of provider clients. A generation
//! request walks the chain from the front: unconfigured providers are
//! skipped, the first success short-circuits the rest, and when every
//! configured provider fails the caller gets a single aggregate error
//! carrying each failure in chain order.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use pmo_abstraction::{ProviderClient, ProviderKind};
use pmo_providers::{ClientFactory, ProviderConfig};
use tracing::{debug, info, warn};

use crate::error::{ProviderFailure, RouterError};

/// Retry behavior for a single provider before the chain moves on.
///
/// The default is no retries: a provider that fails once is recorded and the
/// next provider in the chain is tried immediately. Fallback is the primary
/// resilience mechanism; per-provider retries are opt-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure.
    pub max_retries: u32,
    /// Fixed delay between attempts.
    pub backoff: Duration,
}

/// Routes generation requests across an ordered provider fallback chain.
pub struct LlmRouter {
    chain: Vec<ProviderKind>,
    clients: HashMap<ProviderKind, Arc<dyn ProviderClient>>,
    retry: RetryPolicy,
}

impl LlmRouter {
    /// Build a router from provider configs.
    ///
    /// The chain order is the order of `configs`. Entries whose credentials
    /// are missing produce no client and are skipped at request time; this is
    /// logged rather than failing construction, so a partially
    /// configured deployment still serves from the providers it has.
    #[must_use]
    pub fn new(configs: &[ProviderConfig]) -> Self {
        let mut chain = Vec::with_capacity(configs.len());
        let mut clients: HashMap<ProviderKind, Arc<dyn ProviderClient>> = HashMap::new();
        for config in configs {
            chain.push(config.kind);
            if let Some(client) = ClientFactory::create(config) {
                clients.insert(config.kind, client);
            }
        }
        info!(
            chain_len = chain.len(),
            configured = clients.len(),
            "LLM router initialized"
        );
        Self {
            chain,
            clients,
            retry: RetryPolicy::default(),
        }
    }

    /// Build a router from pre-constructed clients.
    ///
    /// `chain` gives the fallback order; kinds without an entry in `clients`
    /// are treated as unconfigured.
    #[must_use]
    pub fn from_clients(
        chain: Vec<ProviderKind>,
        clients: HashMap<ProviderKind, Arc<dyn ProviderClient>>,
    ) -> Self {
        Self {
            chain,
            clients,
            retry: RetryPolicy::default(),
        }
    }

    /// Set the per-provider retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The configured fallback order.
    #[must_use]
    pub fn chain(&self) -> &[ProviderKind] {
        &self.chain
    }

    /// Whether a provider in the chain has a constructed client.
    #[must_use]
    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        self.clients.contains_key(&kind)
    }

    /// Generate a completion, falling through the provider chain.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::AllProvidersExhausted`] when every configured
    /// provider failed, or immediately when the chain is empty or has no
    /// configured providers at all.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String, RouterError> {
        let mut attempts = Vec::new();

        for kind in &self.chain {
            let Some(client) = self.clients.get(kind) else {
                debug!(provider = %kind, "Skipping unconfigured provider");
                continue;
            };

            let mut tries = 0;
            loop {
                match client.complete(model, prompt).await {
                    Ok(completion) => {
                        info!(provider = %kind, model, "Provider answered");
                        return Ok(completion.content);
                    }
                    Err(err) => {
                        warn!(provider = %kind, error = %err, "Provider attempt failed");
                        if tries < self.retry.max_retries {
                            tries += 1;
                            if !self.retry.backoff.is_zero() {
                                tokio::time::sleep(self.retry.backoff).await;
                            }
                            continue;
                        }
                        attempts.push(ProviderFailure {
                            provider: *kind,
                            detail: err.to_string(),
                        });
                        break;
                    }
                }
            }
        }

        warn!(
            attempted = attempts.len(),
            "All providers exhausted for generation request"
        );
        Err(RouterError::AllProvidersExhausted { attempts })
    }
}
