use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the Jubilee application.
///
/// Loaded from `~/.jubilee/config.toml` by default. Each section corresponds
/// to one subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JubileeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub wish: WishConfig,
    #[serde(default)]
    pub agent: AgentConfig,
}

impl JubileeConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: JubileeConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file does not
    /// exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for the birthday store file.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// API server port.
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.jubilee/data".to_string(),
            log_level: "info".to_string(),
            port: 3000,
        }
    }
}

/// Wish-generation provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WishConfig {
    /// Environment variable holding the provider API key.
    pub api_key_env: String,
    /// Model identifier sent to the provider.
    pub model: String,
    /// Provider base URL (overridable for tests).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for WishConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            model: "gemini-2.0-flash-exp".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Agent-facing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Candidate paths for the agent card file, checked in order.
    pub card_paths: Vec<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            card_paths: vec![
                "./agent_card.json".to_string(),
                "./agent.json".to_string(),
                "./.well-known/agent.json".to_string(),
            ],
        }
    }
}
