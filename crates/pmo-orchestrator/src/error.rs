//! Error types for routing and agent invocation.

use pmo_abstraction::ProviderKind;
use thiserror::Error;

/// Record of one failed provider attempt, kept in chain order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    /// Provider that failed.
    pub provider: ProviderKind,
    /// Error detail reported by the provider client.
    pub detail: String,
}

impl std::fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.provider, self.detail)
    }
}

/// Errors from the provider fallback router.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Every configured provider in the chain failed (or the chain was
    /// empty). `attempts` holds one entry per failed provider, in the order
    /// they were tried.
    #[error("all providers exhausted: [{}]", .attempts.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    AllProvidersExhausted {
        /// Per-provider failure records in chain order.
        attempts: Vec<ProviderFailure>,
    },
}

impl RouterError {
    /// Failure records for an exhaustion error.
    #[must_use]
    pub fn attempts(&self) -> &[ProviderFailure] {
        match self {
            Self::AllProvidersExhausted { attempts } => attempts,
        }
    }
}

/// Errors from agent invocation.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The underlying router exhausted its fallback chain.
    #[error(transparent)]
    Router(#[from] RouterError),

    /// The model answered but the output could not be parsed into the
    /// agent's structured form.
    #[error("failed to parse output of agent '{agent}': {detail}")]
    OutputParse {
        /// Agent that produced the unparseable output.
        agent: String,
        /// Parse error detail.
        detail: String,
    },
}
