//! Application configuration management.
//!
//! This module loads user preferences: the condition and budget the form
//! starts on, and an optional log level. The file is only ever read.
//!
//! Configuration is stored at `~/.config/mealpick/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::HealthCondition;
use crate::recommend::Budget;

/// Application name used for config/log directory paths
pub const APP_NAME: &str = "mealpick";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub default_condition: Option<String>,
    pub default_budget: Option<u32>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for log files
    pub fn log_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Condition the form starts on
    pub fn initial_condition(&self) -> HealthCondition {
        match self.default_condition.as_deref() {
            Some(label) => label.parse().unwrap_or_else(|_| {
                warn!(condition = %label, "Unknown default condition in config, ignoring");
                HealthCondition::ALL[0]
            }),
            None => HealthCondition::ALL[0],
        }
    }

    /// Budget the form starts on, clamped into range
    pub fn initial_budget(&self) -> Budget {
        self.default_budget
            .map(|amount| Budget::clamped(i64::from(amount)))
            .unwrap_or_default()
    }
}
