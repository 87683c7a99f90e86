//! YAML configuration: agent routing ids, gateway endpoint, defaults.

use crate::domain::has_text;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Routing ids for the reasoning service. Opaque tokens: the service
/// decides what sub-agents they fan out to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentsConfig {
    #[serde(default = "default_coordinator_id")]
    pub coordinator: String,
    #[serde(default = "default_publisher_id")]
    pub publisher: String,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            coordinator: default_coordinator_id(),
            publisher: default_publisher_id(),
        }
    }
}

fn default_coordinator_id() -> String {
    "6998291fad21b9c50a06f80a".to_string()
}

fn default_publisher_id() -> String {
    "6998290e9267270c12d34f0a".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://agents.example.com".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefaultsConfig {
    /// Channel used for custom meetings created without one.
    #[serde(default = "default_channel")]
    pub channel: String,
    /// Optional YAML file with the meeting list; bundled samples otherwise.
    #[serde(default)]
    pub meetings_file: Option<PathBuf>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            meetings_file: None,
        }
    }
}

fn default_channel() -> String {
    "#general".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file as YAML: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        const DEFAULT_CONFIG_YAML: &str = include_str!("../meeting-agent.yaml");

        serde_yaml::from_str(DEFAULT_CONFIG_YAML)
            .expect("Failed to parse embedded meeting-agent.yaml - this is a bug in the meeting-agent.yaml file")
    }

    /// Resolution order: explicit path, then `~/.meeting-agent/config.yaml`
    /// if present, then the embedded defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Ok(dir) = agent_dir() {
            let path = dir.join("config.yaml");
            if path.exists() {
                return Self::load(&path);
            }
        }
        Ok(Self::default_config())
    }

    fn validate(&self) -> Result<()> {
        if !has_text(&self.agents.coordinator) {
            anyhow::bail!("agents.coordinator must not be empty");
        }
        if !has_text(&self.agents.publisher) {
            anyhow::bail!("agents.publisher must not be empty");
        }
        if !has_text(&self.gateway.base_url) {
            anyhow::bail!("gateway.base_url must not be empty");
        }
        if self.gateway.timeout_secs == 0 {
            anyhow::bail!("gateway.timeout_secs must be positive");
        }
        Ok(())
    }
}

/// `~/.meeting-agent`, created on demand.
pub fn agent_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(".meeting-agent");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    Ok(dir)
}

/// Directory for the structured JSONL logs.
pub fn logs_dir() -> Result<PathBuf> {
    Ok(agent_dir()?.join("logs"))
}
