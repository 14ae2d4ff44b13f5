//! Built-in agent catalog.
//!
//! Most agents are [`PromptAgent`]s: a name, a model, and a prompt builder,
//! with free-form text back from the router. The three structured agents
//! ([`ScheduleCopilot`], [`BrandKitBot`], [`StakeholderGraphBot`]) add their
//! own output parsing on top of the same contract.

mod brand;
mod catalog;
mod schedule;
mod stakeholders;

pub use brand::BrandKitBot;
pub use catalog::{build_catalog, DEFAULT_MODEL};
pub use schedule::ScheduleCopilot;
pub use stakeholders::StakeholderGraphBot;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::router::LlmRouter;
use crate::{Agent, AgentError, AgentOutput, EventPayload};

/// Function that turns an event payload into a model prompt.
pub type PromptBuilder = fn(&EventPayload) -> String;

/// A text-in, text-out agent defined by its prompt builder.
pub struct PromptAgent {
    name: String,
    model: String,
    build: PromptBuilder,
    router: Arc<LlmRouter>,
}

impl PromptAgent {
    /// Create a prompt agent.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        build: PromptBuilder,
        router: Arc<LlmRouter>,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            build,
            router,
        }
    }
}

#[async_trait]
impl Agent for PromptAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn build_prompt(&self, payload: &EventPayload) -> String {
        (self.build)(payload)
    }

    async fn invoke(
        &self,
        payload: &EventPayload,
        dry_run: bool,
    ) -> Result<AgentOutput, AgentError> {
        let prompt = self.build_prompt(payload);
        if dry_run {
            info!(agent = %self.name, model = %self.model, "Dry run, skipping model call");
            return Ok(AgentOutput::DryRun {
                model: self.model.clone(),
                prompt,
            });
        }
        let text = self.router.generate(&self.model, &prompt).await?;
        Ok(AgentOutput::Text(text))
    }
}

/// Strip a surrounding Markdown code fence from model output.
///
/// Models frequently wrap JSON answers in ```` ```json ```` fences even when
/// asked not to. Plain text without a fence passes through trimmed.
pub(crate) fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the fence line itself, including any language tag
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmo_abstraction::{ProviderClient, ProviderKind};
    use pmo_providers::MockClient;
    use std::collections::HashMap;

    fn router_over(client: Arc<MockClient>) -> Arc<LlmRouter> {
        let mut clients: HashMap<ProviderKind, Arc<dyn ProviderClient>> = HashMap::new();
        clients.insert(ProviderKind::Mock, client);
        Arc::new(LlmRouter::from_clients(vec![ProviderKind::Mock], clients))
    }

    fn greet(payload: &EventPayload) -> String {
        format!("Greet {}", crate::payload_str(payload, "name", "world"))
    }

    #[tokio::test]
    async fn prompt_agent_returns_text_from_router() {
        let client = Arc::new(MockClient::replying("hello back"));
        let agent = PromptAgent::new("greeter", "m", greet, router_over(Arc::clone(&client)));

        let out = agent.invoke(&EventPayload::new(), false).await.unwrap();
        assert_eq!(out.as_text(), Some("hello back"));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn dry_run_never_calls_the_router() {
        let client = Arc::new(MockClient::replying("should not be seen"));
        let agent = PromptAgent::new("greeter", "m", greet, router_over(Arc::clone(&client)));

        let mut payload = EventPayload::new();
        payload.insert("name".into(), serde_json::json!("Ada"));
        let out = agent.invoke(&payload, true).await.unwrap();

        assert_eq!(client.calls(), 0);
        match out {
            AgentOutput::DryRun { model, prompt } => {
                assert_eq!(model, "m");
                assert_eq!(prompt, "Greet Ada");
            }
            other => panic!("expected dry-run output, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn router_exhaustion_propagates_as_agent_error() {
        let client = Arc::new(MockClient::failing("down"));
        let agent = PromptAgent::new("greeter", "m", greet, router_over(client));

        let err = agent.invoke(&EventPayload::new(), false).await.unwrap_err();
        assert!(matches!(err, AgentError::Router(_)));
    }

    #[test]
    fn strip_code_fences_handles_common_shapes() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(strip_code_fences("  plain text  "), "plain text");
    }
}
