//! Brand kit generation agent.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::agents::strip_code_fences;
use crate::router::LlmRouter;
use crate::{payload_str, Agent, AgentError, AgentOutput, EventPayload};

/// Generates an initial brand identity kit as a JSON document.
///
/// The model is asked for strict JSON; when the answer still is not valid
/// JSON after stripping code fences, the raw text is preserved under a
/// `raw_text` key instead of failing the step.
pub struct BrandKitBot {
    model: String,
    router: Arc<LlmRouter>,
}

impl BrandKitBot {
    /// Create the agent against a router.
    #[must_use]
    pub fn new(model: impl Into<String>, router: Arc<LlmRouter>) -> Self {
        Self {
            model: model.into(),
            router,
        }
    }

    /// Parse model output into a brand kit document.
    #[must_use]
    pub fn parse_kit(text: &str) -> serde_json::Value {
        let cleaned = strip_code_fences(text);
        match serde_json::from_str(cleaned) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "Brand kit output was not valid JSON, keeping raw text");
                json!({ "raw_text": cleaned })
            }
        }
    }
}

#[async_trait]
impl Agent for BrandKitBot {
    fn name(&self) -> &str {
        "brand_kit_bot"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn build_prompt(&self, payload: &EventPayload) -> String {
        let name = payload_str(payload, "name", "Unnamed project");
        let project_type = payload_str(payload, "project_type", "default");
        format!(
            "You are a brand strategist. Generate an initial brand kit for the project.\n\
             Project name: {name}\n\
             Project type: {project_type}\n\n\
             Answer in JSON with this shape:\n\
             {{\n\
               \"slogan\": \"...\",\n\
               \"mission_statement\": \"...\",\n\
               \"tone_of_voice\": \"...\",\n\
               \"color_palette\": [\"#RRGGBB - description\", \"...\"],\n\
               \"typography\": {{\"primary\": \"...\", \"secondary\": \"...\"}},\n\
               \"logo_ideas\": [\"...\", \"...\"]\n\
             }}\n"
        )
    }

    async fn invoke(
        &self,
        payload: &EventPayload,
        dry_run: bool,
    ) -> Result<AgentOutput, AgentError> {
        let prompt = self.build_prompt(payload);
        if dry_run {
            info!(agent = %self.name(), model = %self.model, "Dry run, skipping model call");
            return Ok(AgentOutput::DryRun {
                model: self.model.clone(),
                prompt,
            });
        }
        let text = self.router.generate(&self.model, &prompt).await?;
        Ok(AgentOutput::Structured(Self::parse_kit(&text)))
    }
}
