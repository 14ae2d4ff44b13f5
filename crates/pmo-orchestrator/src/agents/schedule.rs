//! Schedule generation agent.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::router::LlmRouter;
use crate::{payload_str, Agent, AgentError, AgentOutput, EventPayload, TaskItem};

/// Generates a basic work breakdown structure for a project.
///
/// The model is asked for one task per line in a dash-separated format; the
/// agent parses those lines into [`TaskItem`]s. Lines that do not match the
/// expected shape are skipped rather than failing the whole schedule.
pub struct ScheduleCopilot {
    model: String,
    router: Arc<LlmRouter>,
}

impl ScheduleCopilot {
    /// Create the agent against a router.
    #[must_use]
    pub fn new(model: impl Into<String>, router: Arc<LlmRouter>) -> Self {
        Self {
            model: model.into(),
            router,
        }
    }

    /// Parse model output into tasks.
    ///
    /// Em and en dashes are normalized to plain hyphens first; each line
    /// needs at least four dash-separated fields (name, DoR, DoD, estimate).
    /// An unparseable estimate becomes 0.0 instead of dropping the task.
    #[must_use]
    pub fn parse_schedule(text: &str) -> Vec<TaskItem> {
        let mut tasks = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let normalized = line.replace(['\u{2014}', '\u{2013}'], "-");
            let parts: Vec<&str> = normalized.split('-').map(str::trim).collect();
            if parts.len() < 4 {
                continue;
            }
            let estimate_hours = parts[3]
                .split_whitespace()
                .next()
                .and_then(|token| token.parse::<f64>().ok())
                .unwrap_or(0.0);
            tasks.push(TaskItem {
                name: parts[0].to_string(),
                dor: parts[1].to_string(),
                dod: parts[2].to_string(),
                estimate_hours,
            });
        }
        tasks
    }
}

#[async_trait]
impl Agent for ScheduleCopilot {
    fn name(&self) -> &str {
        "schedule_copilot"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn build_prompt(&self, payload: &EventPayload) -> String {
        let project_type = payload_str(payload, "project_type", "default");
        format!(
            "Create a basic schedule (WBS) for a project of type '{project_type}'.\n\
             List the main phases, milestones and approximate durations.\n\
             Answer one item per line in the format: Task - DoR - DoD - Estimate (hours).\n"
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
        let tasks = Self::parse_schedule(&text);
        info!(agent = %self.name(), tasks = tasks.len(), "Schedule parsed");
        Ok(AgentOutput::Schedule(tasks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_lines() {
        let text = "Discovery - Stakeholders identified - Charter approved - 16\n\
                    Build - Backlog ready - Demo accepted - 40.5\n";
        let tasks = ScheduleCopilot::parse_schedule(text);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].name, "Discovery");
        assert_eq!(tasks[0].dor, "Stakeholders identified");
        assert_eq!(tasks[0].dod, "Charter approved");
        assert!((tasks[0].estimate_hours - 16.0).abs() < f64::EPSILON);
        assert!((tasks[1].estimate_hours - 40.5).abs() < f64::EPSILON);
    }

    #[test]
    fn normalizes_em_and_en_dashes() {
        let text = "Kickoff \u{2013} Team assigned \u{2014} Agenda sent \u{2013} 4";
        let tasks = ScheduleCopilot::parse_schedule(text);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Kickoff");
    }

    #[test]
    fn skips_short_lines_and_defaults_bad_estimates() {
        let text = "just a heading\n\
                    \n\
                    Testing - Cases written - Suite green - about a week\n";
        let tasks = ScheduleCopilot::parse_schedule(text);
        assert_eq!(tasks.len(), 1);
        assert!((tasks[0].estimate_hours - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn estimate_with_unit_suffix_keeps_the_number() {
        let text = "Deploy - Release notes - Live in prod - 8 hours";
        let tasks = ScheduleCopilot::parse_schedule(text);
        assert!((tasks[0].estimate_hours - 8.0).abs() < f64::EPSILON);
    }
}
