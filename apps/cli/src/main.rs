//! pmo CLI - command-line interface for the PMO360 automation core.
//!
//! Wires configuration, the provider fallback router, the agent catalog and
//! the event dispatcher together, and exposes them as commands.

mod commands;
mod config;
mod scheduler;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use pmo_orchestrator::agents::build_catalog;
use pmo_orchestrator::{AgentRegistry, Dispatcher, LlmRouter};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use config::AppConfig;

/// PMO360 - PMO-as-a-service automation core
#[derive(Parser, Debug)]
#[command(
    name = "pmo",
    author,
    version,
    about = "PMO360 - event-driven PMO automation over LLM agents"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Path to the configuration file
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new project and run its kickoff workflow
    NewProject {
        /// Project name
        name: String,

        /// Project type (drives schedule and compliance prompts)
        #[arg(long, default_value = "default")]
        project_type: String,

        /// Country the project runs in
        #[arg(long, default_value = "Brazil")]
        country: String,

        /// Plan every step without calling any provider
        #[arg(long)]
        dry_run: bool,
    },

    /// Route an arbitrary event through its configured workflow
    RunEvent {
        /// Event name (e.g. "risk.flagged")
        event: String,

        /// Event payload as a JSON object
        #[arg(long, default_value = "{}")]
        payload: String,

        /// Plan every step without calling any provider
        #[arg(long)]
        dry_run: bool,
    },

    /// List the registered agents and their models
    Agents,

    /// Validate workflow rules against the agent registry
    Validate,

    /// Run the background scheduler (status poll + backup jobs)
    Schedule,
}

struct Core {
    registry: Arc<AgentRegistry>,
    dispatcher: Arc<Dispatcher>,
}

async fn build_core(config: &AppConfig) -> Core {
    let router = Arc::new(LlmRouter::new(&config.provider_configs()));
    let registry = Arc::new(AgentRegistry::new());
    registry
        .register_all(build_catalog(&router, &config.model_mapping))
        .await;
    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&registry),
        config.rules.clone(),
    ));
    Core { registry, dispatcher }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    let config = AppConfig::load(&args.config)?;
    let core = build_core(&config).await;

    match command {
        Command::NewProject { name, project_type, country, dry_run } => {
            commands::new_project::execute(
                &core.dispatcher,
                &name,
                &project_type,
                &country,
                dry_run,
            )
            .await?;
        }
        Command::RunEvent { event, payload, dry_run } => {
            commands::run_event::execute(&core.dispatcher, &event, &payload, dry_run).await?;
        }
        Command::Agents => {
            commands::agents::execute(&core.registry).await?;
        }
        Command::Validate => {
            commands::validate::execute(core.dispatcher.rules(), &core.registry).await?;
        }
        Command::Schedule => {
            scheduler::run(Arc::clone(&core.dispatcher), &config.scheduler).await?;
        }
    }

    Ok(())
}
