//! Configuration handling for packlist
//!
//! Configuration is read from `--config` / `$PACKLIST_CONFIG` when given,
//! otherwise from `config.toml` in the user config directory
//! (e.g. `~/.config/packlist/config.toml`). Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::OutputFormat;
use crate::domain::Quantity;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Heading shown at the top of the TUI
    pub title: String,

    /// Start each session with the example items
    pub seed: bool,

    /// Upper bound of the quantity selectors
    pub max_quantity: u32,

    /// TUI event poll interval in milliseconds
    pub tick_rate_ms: u64,

    /// Output format used when `--format` is not given
    pub default_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "My Travel List".to_string(),
            seed: true,
            max_quantity: Quantity::UI_MAX,
            tick_rate_ms: 250,
            default_format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Loads configuration from an explicit path or the default location
    ///
    /// An explicit path must exist. A missing default file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Returns the default config file location
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "packlist", "packlist")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Reads and validates a config file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parses and validates TOML config text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_quantity == 0 {
            return Err(ConfigError::Invalid(
                "max_quantity must be at least 1".to_string(),
            ));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_rate_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
