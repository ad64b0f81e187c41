//! Configuration Management
//!
//! This module loads and saves the client configuration.
//!
//! # Configuration Locations
//! - Local: `.resmon/config.json` (team-shareable, per-project)
//! - Global: `~/.config/resmon/config.json` (per-user)
//!
//! # Resolution Precedence
//! 1. Explicit CLI flags (applied by the caller, highest priority)
//! 2. Local config file (`.resmon/config.json`)
//! 3. Global config file (`~/.config/resmon/config.json`)
//! 4. Defaults (read-write, no log level)
//!
//! Precedence is per field: a local file that only sets `log_level` keeps the
//! global `read_only` value.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ResmonError, Result};

/// Effective client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Refuse CREATE/ALTER/DROP before they reach the executor
    #[serde(default)]
    pub read_only: bool,

    /// Log level for the CLI's subscriber ("off", "error", "warn", "info", "debug", "trace")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Contents of one config file; unset fields defer to lower-precedence files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl ConfigFile {
    /// Layer `other` on top of `self`
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            read_only: other.read_only.or(self.read_only),
            log_level: other.log_level.or(self.log_level),
        }
    }
}

impl From<ConfigFile> for ClientConfig {
    fn from(file: ConfigFile) -> Self {
        Self {
            read_only: file.read_only.unwrap_or(false),
            log_level: file.log_level,
        }
    }
}

impl From<&ClientConfig> for ConfigFile {
    fn from(config: &ClientConfig) -> Self {
        Self {
            read_only: Some(config.read_only),
            log_level: config.log_level.clone(),
        }
    }
}

/// Get path to local config file (`.resmon/config.json`)
pub fn local_config_path() -> Result<PathBuf> {
    let current_dir = std::env::current_dir().map_err(|e| {
        ResmonError::config_error(format!("Could not determine current directory: {e}"))
    })?;

    Ok(current_dir.join(".resmon").join("config.json"))
}

/// Get path to global config file (`~/.config/resmon/config.json`)
pub fn global_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ResmonError::config_error("Could not determine user config directory"))?;

    Ok(config_dir.join("resmon").join("config.json"))
}

/// Load one config file; a missing file is an empty layer
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| ResmonError::config_error(format!("Could not read config file: {e}")))?;

    serde_json::from_str(&contents)
        .map_err(|e| ResmonError::config_error(format!("Invalid config file format: {e}")))
}

/// Save a configuration, creating parent directories as needed
pub fn save_config(path: &Path, config: &ClientConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ResmonError::config_error(format!("Could not create config directory: {e}"))
        })?;
    }

    let contents = serde_json::to_string_pretty(&ConfigFile::from(config))
        .map_err(|e| ResmonError::config_error(format!("Could not serialize config: {e}")))?;

    fs::write(path, contents)
        .map_err(|e| ResmonError::config_error(format!("Could not write config file: {e}")))?;

    Ok(())
}

/// Merge the global and local files at explicit paths
pub fn load_from_paths(global: &Path, local: &Path) -> Result<ClientConfig> {
    let global = load_config_file(global)?;
    let local = load_config_file(local)?;
    Ok(global.merge(local).into())
}

/// Load the effective configuration (local over global over defaults)
pub fn load_with_precedence() -> Result<ClientConfig> {
    load_from_paths(&global_config_path()?, &local_config_path()?)
}
