//! Integration tests for the pmo binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Write a config that routes everything through the mock provider.
fn write_config(dir: &TempDir, rules: &str) -> std::path::PathBuf {
    let path = dir.path().join("pmo360.toml");
    let content = format!(
        r#"fallback_chain = ["mock"]

{rules}
"#
    );
    fs::write(&path, content).unwrap();
    path
}

fn pmo() -> Command {
    Command::cargo_bin("pmo").unwrap()
}

#[test]
fn help_lists_the_commands() {
    pmo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new-project"))
        .stdout(predicate::str::contains("run-event"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("schedule"));
}

#[test]
fn missing_config_file_is_a_clear_error() {
    pmo()
        .arg("--config")
        .arg("/nonexistent/pmo360.toml")
        .arg("agents")
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading config file"));
}

#[test]
fn agents_lists_the_default_catalog() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "");

    pmo()
        .arg("--config")
        .arg(&config)
        .arg("agents")
        .assert()
        .success()
        .stdout(predicate::str::contains("15 agents registered"))
        .stdout(predicate::str::contains("schedule_copilot"))
        .stdout(predicate::str::contains("risk_sentinel"));
}

#[test]
fn validate_accepts_a_consistent_rule_set() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        r#"[rules.event_workflows]
"project.created" = ["draft_schedule", "map_stakeholders"]

[rules.action_map]
draft_schedule = "schedule_copilot"
map_stakeholders = "stakeholder_graph_bot"
"#,
    );

    pmo()
        .arg("--config")
        .arg(&config)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolvable"));
}

#[test]
fn validate_rejects_an_unknown_agent() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        r#"[rules.event_workflows]
"project.created" = ["draft_schedule"]

[rules.action_map]
draft_schedule = "no_such_agent"
"#,
    );

    pmo()
        .arg("--config")
        .arg(&config)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("no_such_agent"));
}

#[test]
fn schedule_rejects_a_zero_interval_config() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        r#"[scheduler]
status_interval_secs = 0
"#,
    );

    pmo()
        .arg("--config")
        .arg(&config)
        .arg("schedule")
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn run_event_with_unknown_event_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "");

    pmo()
        .arg("--config")
        .arg(&config)
        .arg("run-event")
        .arg("totally.unknown")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workflow defined"));
}

#[test]
fn run_event_rejects_a_non_object_payload() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "");

    pmo()
        .arg("--config")
        .arg(&config)
        .arg("run-event")
        .arg("project.created")
        .arg("--payload")
        .arg("[1, 2, 3]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON object"));
}

#[test]
fn new_project_dry_run_plans_without_provider_calls() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        r#"[rules.event_workflows]
"project.created" = ["draft_schedule", "assess_risk"]

[rules.action_map]
draft_schedule = "schedule_copilot"
assess_risk = "risk_sentinel"
"#,
    );

    pmo()
        .arg("--config")
        .arg(&config)
        .arg("new-project")
        .arg("My New Project")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("my-new-project"))
        .stdout(predicate::str::contains("planned, model 'gpt-4o-mini'"))
        // the planned prompts are shown so dry runs can be inspected
        .stdout(predicate::str::contains("Create a basic schedule"))
        .stdout(predicate::str::contains("\"My New Project\""))
        .stdout(predicate::str::contains("2 of 2 steps succeeded"));
}

#[test]
fn run_event_executes_against_the_mock_provider() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        r#"[rules.event_workflows]
"risk.flagged" = ["assess_risk"]

[rules.action_map]
assess_risk = "risk_sentinel"
"#,
    );

    pmo()
        .arg("--config")
        .arg(&config)
        .arg("run-event")
        .arg("risk.flagged")
        .arg("--payload")
        .arg(r#"{"name": "Apollo"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 1 steps succeeded"));
}
