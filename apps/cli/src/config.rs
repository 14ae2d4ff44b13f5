//! Configuration loading for the pmo CLI.
//!
//! The config file carries everything the core needs already structured:
//! the provider fallback chain, per-provider credentials, the agent model
//! mapping, workflow rules and scheduler intervals. Environment variables
//! override the credential entries so keys can stay out of the file.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use pmo_abstraction::ProviderKind;
use pmo_orchestrator::WorkflowRules;
use pmo_providers::ProviderConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/pmo360.toml";

/// Credential env vars, keyed by canonical provider name.
const ENV_OVERRIDES: [(&str, &str); 5] = [
    ("openai", "OPENAI_API_KEY"),
    ("gemini", "GEMINI_API_KEY"),
    ("anthropic", "ANTHROPIC_API_KEY"),
    ("mistral", "MISTRAL_API_KEY"),
    ("cohere", "COHERE_API_KEY"),
];

fn default_status_interval() -> u64 {
    60
}

fn default_backup_interval() -> u64 {
    120
}

/// Interval settings for the background scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between status poll runs.
    #[serde(default = "default_status_interval")]
    pub status_interval_secs: u64,
    /// Seconds between backup runs.
    #[serde(default = "default_backup_interval")]
    pub backup_interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            status_interval_secs: default_status_interval(),
            backup_interval_secs: default_backup_interval(),
        }
    }
}

impl SchedulerConfig {
    /// Check the intervals can actually drive a timer.
    ///
    /// A zero interval would panic inside `tokio::time::interval`, so it is
    /// rejected at load time instead.
    pub fn ensure_valid(&self) -> Result<()> {
        if self.status_interval_secs == 0 || self.backup_interval_secs == 0 {
            bail!("scheduler intervals must be greater than zero");
        }
        Ok(())
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Provider names in fallback order.
    #[serde(default)]
    pub fallback_chain: Vec<String>,
    /// Credentials keyed by canonical provider name.
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
    /// Agent name to model identifier.
    #[serde(default)]
    pub model_mapping: HashMap<String, String>,
    /// Event workflows and action mappings.
    #[serde(default)]
    pub rules: WorkflowRules,
    /// Scheduler intervals.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and apply env-var overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file '{}'", path.display()))?;
        let mut config: Self = toml::from_str(&raw)
            .with_context(|| format!("parsing config file '{}'", path.display()))?;
        config
            .scheduler
            .ensure_valid()
            .with_context(|| format!("invalid config in '{}'", path.display()))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Overwrite credential entries from the environment when set.
    pub fn apply_env_overrides(&mut self) {
        for (provider, var) in ENV_OVERRIDES {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() {
                    debug!(provider, var, "Overriding credential from environment");
                    self.api_keys.insert(provider.to_string(), value);
                }
            }
        }
    }

    /// Resolve the fallback chain into provider configs for the router.
    ///
    /// Unknown provider names are logged and skipped so a typo in the chain
    /// degrades to a shorter chain instead of refusing to start.
    #[must_use]
    pub fn provider_configs(&self) -> Vec<ProviderConfig> {
        let mut configs = Vec::with_capacity(self.fallback_chain.len());
        for name in &self.fallback_chain {
            match name.parse::<ProviderKind>() {
                Ok(kind) => {
                    let api_key = self
                        .api_keys
                        .get(kind.as_str())
                        .or_else(|| self.api_keys.get(name))
                        .cloned();
                    configs.push(ProviderConfig::new(kind, api_key));
                }
                Err(_) => warn!(provider = %name, "Unknown provider in fallback chain, skipping"),
            }
        }
        configs
    }
}

/// Derive a URL-safe slug from a project name.
///
/// Lowercases, turns spaces into hyphens and drops everything that is not
/// alphanumeric, hyphen or underscore.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        fallback_chain = ["gemini", "openai", "mock"]

        [api_keys]
        gemini = "g-key"

        [model_mapping]
        risk_sentinel = "gpt-4o"

        [rules.event_workflows]
        "project.created" = ["draft_schedule"]

        [rules.action_map]
        draft_schedule = "schedule_copilot"

        [scheduler]
        status_interval_secs = 5
    "#;

    #[test]
    fn parses_a_full_config() {
        let config: AppConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.fallback_chain, ["gemini", "openai", "mock"]);
        assert_eq!(config.api_keys["gemini"], "g-key");
        assert_eq!(config.model_mapping["risk_sentinel"], "gpt-4o");
        assert_eq!(config.rules.agent_key("draft_schedule"), Some("schedule_copilot"));
        assert_eq!(config.scheduler.status_interval_secs, 5);
        // unset interval falls back to its default
        assert_eq!(config.scheduler.backup_interval_secs, 120);
    }

    #[test]
    fn provider_configs_follow_chain_order_and_skip_unknown_names() {
        let mut config: AppConfig = toml::from_str(SAMPLE).unwrap();
        config.fallback_chain.push("huggingface".to_string());

        let configs = config.provider_configs();
        assert_eq!(configs.len(), 3);
        assert_eq!(configs[0].kind, ProviderKind::Gemini);
        assert_eq!(configs[0].api_key.as_deref(), Some("g-key"));
        assert_eq!(configs[1].kind, ProviderKind::OpenAi);
        assert!(configs[1].api_key.is_none());
        assert_eq!(configs[2].kind, ProviderKind::Mock);
    }

    #[test]
    // set_var is unsafe in edition 2024; confined to this single-threaded test
    #[allow(unsafe_code)]
    fn env_var_overrides_file_credential() {
        let mut config: AppConfig = toml::from_str(SAMPLE).unwrap();
        unsafe { std::env::set_var("GEMINI_API_KEY", "env-key") };
        config.apply_env_overrides();
        unsafe { std::env::remove_var("GEMINI_API_KEY") };
        assert_eq!(config.api_keys["gemini"], "env-key");
    }

    #[test]
    fn zero_scheduler_intervals_are_rejected() {
        let config: AppConfig = toml::from_str(
            r#"[scheduler]
               status_interval_secs = 0"#,
        )
        .unwrap();
        let err = config.scheduler.ensure_valid().unwrap_err();
        assert!(err.to_string().contains("greater than zero"));

        assert!(SchedulerConfig::default().ensure_valid().is_ok());
    }

    #[test]
    fn slugify_matches_project_naming_rules() {
        assert_eq!(slugify("My New Project"), "my-new-project");
        assert_eq!(slugify("Caf\u{e9} 2.0!"), "caf\u{e9}-20");
        assert_eq!(slugify("already_slugged"), "already_slugged");
    }
}
