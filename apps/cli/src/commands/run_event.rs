//! Run event command.

use anyhow::{bail, Context};
use pmo_orchestrator::Dispatcher;

/// Route an arbitrary event with a JSON payload through its workflow.
pub async fn execute(
    dispatcher: &Dispatcher,
    event: &str,
    payload: &str,
    dry_run: bool,
) -> anyhow::Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(payload).context("payload is not valid JSON")?;
    let Some(payload) = value.as_object() else {
        bail!("payload must be a JSON object");
    };

    let report = dispatcher.route_event(event, payload, dry_run).await;
    super::print_report(&report);
    Ok(())
}
