//! Stakeholder mapping agent.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::agents::strip_code_fences;
use crate::router::LlmRouter;
use crate::{payload_str, Agent, AgentError, AgentOutput, EventPayload, Stakeholder};

/// Maps the key stakeholders of a project with influence, interest and an
/// engagement strategy for each.
///
/// Unlike the brand kit there is no useful raw-text fallback for this
/// output: downstream consumers need the structured rows, so an answer that
/// cannot be parsed surfaces as [`AgentError::OutputParse`] and the
/// dispatcher records the step as failed.
pub struct StakeholderGraphBot {
    model: String,
    router: Arc<LlmRouter>,
}

impl StakeholderGraphBot {
    /// Create the agent against a router.
    #[must_use]
    pub fn new(model: impl Into<String>, router: Arc<LlmRouter>) -> Self {
        Self {
            model: model.into(),
            router,
        }
    }

    /// Parse model output into stakeholder rows.
    ///
    /// # Errors
    ///
    /// Returns the serde error message when the cleaned text is not a JSON
    /// array of stakeholder objects.
    pub fn parse_map(text: &str) -> Result<Vec<Stakeholder>, String> {
        let cleaned = strip_code_fences(text);
        serde_json::from_str(cleaned).map_err(|err| err.to_string())
    }
}

#[async_trait]
impl Agent for StakeholderGraphBot {
    fn name(&self) -> &str {
        "stakeholder_graph_bot"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn build_prompt(&self, payload: &EventPayload) -> String {
        let name = payload_str(payload, "name", "");
        let project_type = payload_str(payload, "project_type", "default");
        format!(
            "Act as a stakeholder management specialist.\n\
             For a project named \"{name}\" of type \"{project_type}\", identify \
             4 key stakeholder types.\n\n\
             For each stakeholder provide:\n\
             - \"stakeholder\": the name or type (e.g. \"End users\", \"Investors\").\n\
             - \"influence\": influence over the project (low, medium, high).\n\
             - \"interest\": interest in the project (low, medium, high).\n\
             - \"engagement_strategy\": a concise engagement strategy.\n\n\
             Answer ONLY with a JSON array of objects in that shape, with no \
             additional text."
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
        let stakeholders = Self::parse_map(&text).map_err(|detail| AgentError::OutputParse {
            agent: self.name().to_string(),
            detail,
        })?;
        info!(agent = %self.name(), rows = stakeholders.len(), "Stakeholder map parsed");
        Ok(AgentOutput::Stakeholders(stakeholders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"[
        {
            "stakeholder": "End users",
            "influence": "medium",
            "interest": "high",
            "engagement_strategy": "Monthly feedback sessions"
        }
    ]"#;

    #[test]
    fn parses_a_json_array() {
        let rows = StakeholderGraphBot::parse_map(VALID).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stakeholder, "End users");
        assert_eq!(rows[0].engagement_strategy, "Monthly feedback sessions");
    }

    #[test]
    fn parses_a_fenced_array() {
        let fenced = format!("```json\n{VALID}\n```");
        assert_eq!(StakeholderGraphBot::parse_map(&fenced).unwrap().len(), 1);
    }

    #[test]
    fn rejects_non_array_output() {
        assert!(StakeholderGraphBot::parse_map("no stakeholders found").is_err());
    }
}
