//! Configuration for the wellbear CLI
//!
//! Stored at `~/.wellbear/config.toml`. Auto-created on first use with a
//! generated user id and default goals.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::engine::mood::DEFAULT_CAPACITY;

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_weekly_goal() -> u32 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Identifier the store keys all state by.
    pub user_id: UserId,

    /// How many mood entries the bounded history retains.
    #[serde(default = "default_capacity")]
    pub history_capacity: usize,

    /// Target number of active days per week.
    #[serde(default = "default_weekly_goal")]
    pub weekly_activity_goal: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_id: UserId::generate(),
            history_capacity: default_capacity(),
            weekly_activity_goal: default_weekly_goal(),
        }
    }
}

impl Config {
    /// Get the global config directory path (~/.wellbear/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".wellbear")
    }

    /// Get the global config file path (~/.wellbear/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Load the global config, creating it with defaults on first run.
    pub fn load_or_init() -> Result<Self> {
        let path = Self::global_config_path();
        if path.exists() {
            Self::from_file(&path)
        } else {
            let config = Config::default();
            config.save_to_file(&path)?;
            tracing::info!(path = %path.display(), "created default config");
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::default();
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.user_id, config.user_id);
        assert_eq!(loaded.history_capacity, DEFAULT_CAPACITY);
        assert_eq!(loaded.weekly_activity_goal, 5);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "user_id = \"someone\"\n").unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.user_id.as_str(), "someone");
        assert_eq!(loaded.history_capacity, DEFAULT_CAPACITY);
    }
}
