//! Agents listing command.

use colored::Colorize;
use pmo_orchestrator::AgentRegistry;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct AgentRow {
    #[tabled(rename = "Agent")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
}

/// List the registered agents and their models.
pub async fn execute(registry: &AgentRegistry) -> anyhow::Result<()> {
    let infos = registry.list().await;
    if infos.is_empty() {
        println!("{}", "No agents registered.".yellow());
        return Ok(());
    }

    let rows: Vec<AgentRow> = infos
        .into_iter()
        .map(|info| AgentRow {
            name: info.name,
            model: info.model,
        })
        .collect();

    println!("{}", format!("{} agents registered", rows.len()).bold().green());
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}
