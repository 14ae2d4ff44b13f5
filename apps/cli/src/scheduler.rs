//! Background interval scheduler.
//!
//! Runs two recurring jobs by routing their events through the dispatcher:
//! a status poll and a backup. A job that fails (or has no workflow
//! configured) is logged and the loop keeps going; only Ctrl-C stops it.

use std::sync::Arc;
use std::time::Duration;

use pmo_orchestrator::{Dispatcher, EventPayload};
use tokio::time::interval;
use tracing::{info, warn};

use crate::config::SchedulerConfig;

/// Event fired on every status poll tick.
pub const STATUS_POLL: &str = "status.poll";
/// Event fired on every backup tick.
pub const BACKUP_REQUESTED: &str = "backup.requested";

async fn run_job(dispatcher: &Dispatcher, event: &str) {
    let report = dispatcher.route_event(event, &EventPayload::new(), false).await;
    if !report.known_event {
        warn!(event, "Scheduled job has no workflow configured");
    } else if report.failed() > 0 {
        warn!(event, failed = report.failed(), "Scheduled job finished with failures");
    } else {
        info!(event, steps = report.steps.len(), "Scheduled job finished");
    }
}

/// Run the scheduler until Ctrl-C.
pub async fn run(dispatcher: Arc<Dispatcher>, config: &SchedulerConfig) -> anyhow::Result<()> {
    let mut status = interval(Duration::from_secs(config.status_interval_secs));
    let mut backup = interval(Duration::from_secs(config.backup_interval_secs));
    // the first tick of each interval fires immediately; skip it so startup
    // does not run every job at once
    status.tick().await;
    backup.tick().await;

    info!(
        status_every_secs = config.status_interval_secs,
        backup_every_secs = config.backup_interval_secs,
        "Scheduler started, press Ctrl-C to stop"
    );

    loop {
        tokio::select! {
            _ = status.tick() => run_job(&dispatcher, STATUS_POLL).await,
            _ = backup.tick() => run_job(&dispatcher, BACKUP_REQUESTED).await,
            _ = tokio::signal::ctrl_c() => {
                info!("Scheduler shutting down");
                return Ok(());
            }
        }
    }
}
