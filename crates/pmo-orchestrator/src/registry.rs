//! Agent registry.
//!
//! Agents are registered once at startup and looked up by key when the
//! dispatcher resolves workflow steps. The registry is shared behind an
//! `Arc` and safe to read concurrently.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::Agent;

/// Summary row describing a registered agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    /// Registry key.
    pub name: String,
    /// Model the agent targets.
    pub model: String,
}

/// Thread-safe store of agents keyed by name.
#[derive(Default)]
pub struct AgentRegistry {
    agents: RwLock<HashMap<String, Arc<dyn Agent>>>,
}

impl AgentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent under its own name. Replaces any previous agent
    /// with the same key.
    pub async fn register(&self, agent: Arc<dyn Agent>) {
        let name = agent.name().to_string();
        debug!(agent = %name, model = %agent.model(), "Registering agent");
        let mut agents = self.agents.write().await;
        agents.insert(name, agent);
    }

    /// Register a whole catalog at once.
    pub async fn register_all(&self, catalog: Vec<Arc<dyn Agent>>) {
        let count = catalog.len();
        let mut agents = self.agents.write().await;
        for agent in catalog {
            agents.insert(agent.name().to_string(), agent);
        }
        info!(count, "Agent catalog registered");
    }

    /// Look up an agent by key.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Agent>> {
        let agents = self.agents.read().await;
        agents.get(name).cloned()
    }

    /// Whether an agent is registered under this key.
    pub async fn contains(&self, name: &str) -> bool {
        let agents = self.agents.read().await;
        agents.contains_key(name)
    }

    /// List registered agents, sorted by name.
    pub async fn list(&self) -> Vec<AgentInfo> {
        let agents = self.agents.read().await;
        let mut infos: Vec<AgentInfo> = agents
            .values()
            .map(|agent| AgentInfo {
                name: agent.name().to_string(),
                model: agent.model().to_string(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Number of registered agents.
    pub async fn count(&self) -> usize {
        let agents = self.agents.read().await;
        agents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AgentError, AgentOutput, EventPayload};
    use async_trait::async_trait;

    struct StubAgent {
        name: &'static str,
    }

    #[async_trait]
    impl Agent for StubAgent {
        fn name(&self) -> &str {
            self.name
        }

        fn model(&self) -> &str {
            "stub-model"
        }

        fn build_prompt(&self, _payload: &EventPayload) -> String {
            String::new()
        }

        async fn invoke(
            &self,
            _payload: &EventPayload,
            _dry_run: bool,
        ) -> Result<AgentOutput, AgentError> {
            Ok(AgentOutput::Text("stub".into()))
        }
    }

    #[tokio::test]
    async fn register_and_get() {
        let registry = AgentRegistry::new();
        registry.register(Arc::new(StubAgent { name: "alpha" })).await;

        assert!(registry.contains("alpha").await);
        assert!(registry.get("alpha").await.is_some());
        assert!(registry.get("beta").await.is_none());
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn list_is_sorted_by_name() {
        let registry = AgentRegistry::new();
        registry
            .register_all(vec![
                Arc::new(StubAgent { name: "zeta" }),
                Arc::new(StubAgent { name: "alpha" }),
            ])
            .await;

        let infos = registry.list().await;
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].name, "alpha");
        assert_eq!(infos[1].name, "zeta");
    }

    #[tokio::test]
    async fn re_registering_replaces_the_previous_agent() {
        let registry = AgentRegistry::new();
        registry.register(Arc::new(StubAgent { name: "alpha" })).await;
        registry.register(Arc::new(StubAgent { name: "alpha" })).await;
        assert_eq!(registry.count().await, 1);
    }
}
