//! Rules validation command.

use anyhow::bail;
use colored::Colorize;
use pmo_orchestrator::{AgentRegistry, WorkflowRules};

/// Check every workflow step against the action map and registry.
///
/// Exits non-zero when any step is unresolvable, so this can gate CI and
/// deployments on a consistent rule set.
pub async fn execute(rules: &WorkflowRules, registry: &AgentRegistry) -> anyhow::Result<()> {
    let issues = rules.validate(registry).await;
    if issues.is_empty() {
        println!(
            "{}",
            format!(
                "All {} events resolvable against {} registered agents.",
                rules.events().len(),
                registry.count().await
            )
            .green()
        );
        return Ok(());
    }

    for issue in &issues {
        println!("{} {}", "error:".red().bold(), issue);
    }
    bail!("rule validation failed with {} issue(s)", issues.len());
}
