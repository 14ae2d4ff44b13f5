//! Event dispatch engine.
//!
//! `route_event` is the single entry point for the automation core: it
//! resolves an event to its workflow, runs each step in order, and returns a
//! report describing what happened. Dispatch itself never fails. Unknown
//! events are logged no-ops, and a step that cannot be resolved or whose
//! agent errors is recorded in the report while the remaining steps still
//! run.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::registry::AgentRegistry;
use crate::rules::WorkflowRules;
use crate::{AgentOutput, EventPayload};

/// How a single workflow step ended.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The agent ran (or planned, in dry-run mode) and produced output.
    Succeeded(AgentOutput),
    /// The action had no entry in the action map.
    UnresolvedAction,
    /// The action mapped to an agent key that is not registered.
    UnresolvedAgent {
        /// The missing agent key.
        agent: String,
    },
    /// The agent was invoked and returned an error.
    Failed {
        /// Error detail from the agent.
        detail: String,
    },
}

impl StepOutcome {
    /// True when the step produced output.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

/// Record of one workflow step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Zero-based position in the workflow.
    pub index: usize,
    /// The action this step executed.
    pub action: String,
    /// Agent key the action resolved to, when resolution got that far.
    pub agent: Option<String>,
    /// How the step ended.
    pub outcome: StepOutcome,
}

/// Full account of one dispatched event.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowReport {
    /// The event that was routed.
    pub event: String,
    /// Whether the run was a dry run.
    pub dry_run: bool,
    /// Whether a workflow was defined for the event.
    pub known_event: bool,
    /// One record per workflow step, in execution order.
    pub steps: Vec<StepReport>,
}

impl WorkflowReport {
    /// Number of steps that produced output.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.is_success()).count()
    }

    /// Number of steps that did not produce output.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.steps.len() - self.succeeded()
    }
}

/// Routes domain events through their configured agent workflows.
pub struct Dispatcher {
    registry: Arc<AgentRegistry>,
    rules: WorkflowRules,
}

impl Dispatcher {
    /// Create a dispatcher over a registry and rule set.
    #[must_use]
    pub fn new(registry: Arc<AgentRegistry>, rules: WorkflowRules) -> Self {
        Self { registry, rules }
    }

    /// The rule set this dispatcher routes with.
    #[must_use]
    pub const fn rules(&self) -> &WorkflowRules {
        &self.rules
    }

    /// Route an event through its workflow.
    ///
    /// Steps run strictly in order. In dry-run mode each agent plans its
    /// call without performing it; the dry-run flag is threaded through
    /// unchanged to every step.
    pub async fn route_event(
        &self,
        event: &str,
        payload: &EventPayload,
        dry_run: bool,
    ) -> WorkflowReport {
        info!(event, dry_run, "Event received");

        let Some(workflow) = self.rules.workflow(event) else {
            info!(event, "No workflow defined for event, ignoring");
            return WorkflowReport {
                event: event.to_string(),
                dry_run,
                known_event: false,
                steps: Vec::new(),
            };
        };

        let total = workflow.len();
        let mut steps = Vec::with_capacity(total);

        for (index, action) in workflow.iter().enumerate() {
            info!(event, step = index + 1, total, action = %action, "Executing step");

            let Some(agent_key) = self.rules.agent_key(action) else {
                warn!(event, action = %action, "No agent mapped for action, skipping step");
                steps.push(StepReport {
                    index,
                    action: action.clone(),
                    agent: None,
                    outcome: StepOutcome::UnresolvedAction,
                });
                continue;
            };

            let Some(agent) = self.registry.get(agent_key).await else {
                warn!(event, action = %action, agent = %agent_key, "Mapped agent not registered, skipping step");
                steps.push(StepReport {
                    index,
                    action: action.clone(),
                    agent: Some(agent_key.to_string()),
                    outcome: StepOutcome::UnresolvedAgent {
                        agent: agent_key.to_string(),
                    },
                });
                continue;
            };

            let outcome = match agent.invoke(payload, dry_run).await {
                Ok(output) => StepOutcome::Succeeded(output),
                Err(err) => {
                    error!(event, action = %action, agent = %agent_key, error = %err, "Step failed");
                    StepOutcome::Failed {
                        detail: err.to_string(),
                    }
                }
            };

            steps.push(StepReport {
                index,
                action: action.clone(),
                agent: Some(agent_key.to_string()),
                outcome,
            });
        }

        let report = WorkflowReport {
            event: event.to_string(),
            dry_run,
            known_event: true,
            steps,
        };
        info!(
            event,
            succeeded = report.succeeded(),
            failed = report.failed(),
            "Workflow completed"
        );
        report
    }
}
