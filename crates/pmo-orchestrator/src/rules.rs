//! Workflow rules.
//!
//! Rules are plain data loaded from configuration: a map from event name to
//! an ordered list of actions, and a map from action to the agent key that
//! handles it. Keeping both as data means new workflows ship as config
//! changes, and `validate` can check the whole rule set against the registry
//! at load time instead of discovering a bad mapping mid-workflow.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::registry::AgentRegistry;

/// Declarative event-to-workflow rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRules {
    /// Event name to ordered action list.
    #[serde(default)]
    pub event_workflows: HashMap<String, Vec<String>>,
    /// Action name to agent registry key.
    #[serde(default)]
    pub action_map: HashMap<String, String>,
}

/// A problem found while validating rules against a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleIssue {
    /// An action in a workflow has no entry in the action map.
    UnmappedAction {
        /// Event whose workflow references the action.
        event: String,
        /// The unmapped action.
        action: String,
    },
    /// An action maps to an agent key that is not registered.
    UnknownAgent {
        /// Event whose workflow references the action.
        event: String,
        /// The action in question.
        action: String,
        /// The missing agent key.
        agent: String,
    },
}

impl std::fmt::Display for RuleIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnmappedAction { event, action } => {
                write!(f, "event '{event}': action '{action}' has no agent mapping")
            }
            Self::UnknownAgent { event, action, agent } => {
                write!(
                    f,
                    "event '{event}': action '{action}' maps to unknown agent '{agent}'"
                )
            }
        }
    }
}

impl WorkflowRules {
    /// The ordered action list for an event, if one is defined.
    #[must_use]
    pub fn workflow(&self, event: &str) -> Option<&[String]> {
        self.event_workflows.get(event).map(Vec::as_slice)
    }

    /// The agent key an action resolves to, if mapped.
    #[must_use]
    pub fn agent_key(&self, action: &str) -> Option<&str> {
        self.action_map.get(action).map(String::as_str)
    }

    /// Event names with a defined workflow, sorted.
    #[must_use]
    pub fn events(&self) -> Vec<&str> {
        let mut events: Vec<&str> = self.event_workflows.keys().map(String::as_str).collect();
        events.sort_unstable();
        events
    }

    /// Check every workflow step against the action map and the registry.
    ///
    /// Returns one issue per unresolvable step; an empty vec means every
    /// event can be dispatched end to end.
    pub async fn validate(&self, registry: &AgentRegistry) -> Vec<RuleIssue> {
        let mut issues = Vec::new();
        for event in self.events() {
            for action in &self.event_workflows[event] {
                match self.agent_key(action) {
                    None => issues.push(RuleIssue::UnmappedAction {
                        event: event.to_string(),
                        action: action.clone(),
                    }),
                    Some(agent) => {
                        if !registry.contains(agent).await {
                            issues.push(RuleIssue::UnknownAgent {
                                event: event.to_string(),
                                action: action.clone(),
                                agent: agent.to_string(),
                            });
                        }
                    }
                }
            }
        }
        issues
    }
}
