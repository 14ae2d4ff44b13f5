//! New project command.

use colored::Colorize;
use pmo_orchestrator::{Dispatcher, EventPayload};
use serde_json::json;

use crate::config::slugify;

/// Event fired when a project is created.
pub const PROJECT_CREATED: &str = "project.created";

/// Create a new project and route its kickoff workflow.
pub async fn execute(
    dispatcher: &Dispatcher,
    name: &str,
    project_type: &str,
    country: &str,
    dry_run: bool,
) -> anyhow::Result<()> {
    let slug = slugify(name);
    println!("{}", format!("Creating project '{name}' ({slug})").bold().green());

    let mut payload = EventPayload::new();
    payload.insert("slug".into(), json!(slug));
    payload.insert("name".into(), json!(name));
    payload.insert("project_type".into(), json!(project_type));
    payload.insert("country".into(), json!(country));

    let report = dispatcher.route_event(PROJECT_CREATED, &payload, dry_run).await;
    super::print_report(&report);
    Ok(())
}
