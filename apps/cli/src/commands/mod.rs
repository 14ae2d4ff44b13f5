//! Command implementations for the pmo CLI.

pub mod agents;
pub mod new_project;
pub mod run_event;
pub mod validate;

use colored::Colorize;
use pmo_orchestrator::{AgentOutput, StepOutcome, WorkflowReport};

/// Print a workflow report for a human.
pub fn print_report(report: &WorkflowReport) {
    if !report.known_event {
        println!("{}", format!("No workflow defined for event '{}', nothing to do.", report.event).yellow());
        return;
    }

    let mode = if report.dry_run { " (dry run)" } else { "" };
    println!();
    println!("{}", format!("Event '{}'{mode}:", report.event).bold());

    for step in &report.steps {
        let agent = step.agent.as_deref().unwrap_or("-");
        let line = match &step.outcome {
            StepOutcome::Succeeded(AgentOutput::DryRun { model, prompt }) => {
                println!(
                    "  {} {} -> {} (planned, model '{model}')",
                    "~".yellow(),
                    step.action,
                    agent
                );
                for prompt_line in prompt.lines() {
                    println!("      {}", prompt_line.dimmed());
                }
                continue;
            }
            StepOutcome::Succeeded(_) => {
                format!("  {} {} -> {}", "ok".green(), step.action, agent)
            }
            StepOutcome::UnresolvedAction => {
                format!("  {} {} (no agent mapped)", "!!".yellow(), step.action)
            }
            StepOutcome::UnresolvedAgent { agent } => {
                format!("  {} {} (agent '{agent}' not registered)", "!!".yellow(), step.action)
            }
            StepOutcome::Failed { detail } => {
                format!("  {} {} -> {}: {}", "err".red(), step.action, agent, detail)
            }
        };
        println!("{line}");
    }

    println!(
        "{}",
        format!(
            "{} of {} steps succeeded.",
            report.succeeded(),
            report.steps.len()
        )
        .bold()
    );
}
