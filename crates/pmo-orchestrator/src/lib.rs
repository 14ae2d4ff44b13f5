//! Agent orchestration for PMO360.
//!
//! This crate hosts the two routing layers of the automation core:
//!
//! - [`LlmRouter`] walks an ordered provider fallback chain and returns the
//!   first successful completion, aggregating per-provider failures when the
//!   chain is exhausted.
//! - [`Dispatcher`] maps domain events to agent workflows, invoking each step
//!   in order and isolating per-step failures so one broken agent never
//!   aborts the rest of the workflow.
//!
//! Agents implement the [`Agent`] trait and are looked up by key in an
//! [`AgentRegistry`]. The built-in catalog lives in [`agents`].

pub mod agents;
pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod router;
pub mod rules;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use dispatcher::{Dispatcher, StepOutcome, StepReport, WorkflowReport};
pub use error::{AgentError, ProviderFailure, RouterError};
pub use registry::{AgentInfo, AgentRegistry};
pub use router::{LlmRouter, RetryPolicy};
pub use rules::{RuleIssue, WorkflowRules};

/// Key-value payload attached to a domain event.
///
/// Agents read the fields they care about and ignore the rest, so callers can
/// pass a superset of what any single agent needs.
pub type EventPayload = serde_json::Map<String, serde_json::Value>;

/// Read a string field from an event payload, falling back to a default when
/// the key is absent or not a string.
pub fn payload_str<'a>(payload: &'a EventPayload, key: &str, default: &'a str) -> &'a str {
    payload
        .get(key)
        .and_then(serde_json::Value::as_str)
        .unwrap_or(default)
}

/// A single task produced by the schedule agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskItem {
    /// Task name.
    pub name: String,
    /// Definition of Ready.
    pub dor: String,
    /// Definition of Done.
    pub dod: String,
    /// Effort estimate in hours.
    pub estimate_hours: f64,
}

/// One row of a stakeholder influence/interest map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stakeholder {
    /// Stakeholder name or role.
    pub stakeholder: String,
    /// Influence level (e.g. "high", "medium", "low").
    pub influence: String,
    /// Interest level.
    pub interest: String,
    /// Recommended engagement strategy.
    pub engagement_strategy: String,
}

/// What an agent produced for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AgentOutput {
    /// Dry-run mode: the agent planned its call but performed no side effects.
    DryRun {
        /// Model the agent would have used.
        model: String,
        /// Prompt the agent would have sent.
        prompt: String,
    },
    /// Free-form text from a prompt agent.
    Text(String),
    /// Structured JSON, e.g. a brand kit document.
    Structured(serde_json::Value),
    /// A parsed task schedule.
    Schedule(Vec<TaskItem>),
    /// A parsed stakeholder map.
    Stakeholders(Vec<Stakeholder>),
}

impl AgentOutput {
    /// Returns the text content if this is a [`AgentOutput::Text`] variant.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns true for dry-run outputs.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        matches!(self, Self::DryRun { .. })
    }
}

/// Capability contract every PMO agent implements.
///
/// An agent owns its model choice and prompt construction. `invoke` is the
/// single entry point the dispatcher calls; in dry-run mode it must return
/// [`AgentOutput::DryRun`] without touching the router or any other side
/// effect.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Stable key the agent is registered under.
    fn name(&self) -> &str;

    /// Model identifier passed to the router.
    fn model(&self) -> &str;

    /// Build the prompt for a payload. Pure; no I/O.
    fn build_prompt(&self, payload: &EventPayload) -> String;

    /// Run the agent against a payload.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Router`] when every provider in the fallback
    /// chain failed, or [`AgentError::OutputParse`] when the completion could
    /// not be turned into the agent's structured output.
    async fn invoke(&self, payload: &EventPayload, dry_run: bool) -> Result<AgentOutput, AgentError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> EventPayload {
        let mut map = EventPayload::new();
        map.insert("project_name".into(), json!("Apollo"));
        map.insert("count".into(), json!(3));
        map
    }

    #[test]
    fn payload_str_reads_string_fields() {
        assert_eq!(payload_str(&payload(), "project_name", "x"), "Apollo");
    }

    #[test]
    fn payload_str_falls_back_for_missing_or_non_string() {
        let p = payload();
        assert_eq!(payload_str(&p, "missing", "default"), "default");
        assert_eq!(payload_str(&p, "count", "default"), "default");
    }

    #[test]
    fn dry_run_output_is_flagged() {
        let out = AgentOutput::DryRun {
            model: "gpt-4o-mini".into(),
            prompt: "hello".into(),
        };
        assert!(out.is_dry_run());
        assert!(out.as_text().is_none());
    }
}
