//! Service configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Roster ingestion configuration
    pub roster: RosterConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Where the player roster comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Path to the roster JSON file
    pub path: PathBuf,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("data/roster.json") }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "compact".to_string() }
    }
}

/// Load configuration from a TOML file, falling back to defaults when no
/// file is given. The `LOBBY_ROSTER` environment variable overrides the
/// configured roster path either way.
pub fn load_configuration(path: Option<&Path>) -> Result<ServiceConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => ServiceConfig::default(),
    };

    if let Ok(roster) = std::env::var("LOBBY_ROSTER") {
        config.roster.path = PathBuf::from(roster);
    }

    Ok(config)
}
