//! Configuration management

use crate::error::{DaybookError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Directory holding daybook's own state inside a diary root
pub const DAYBOOK_DIR: &str = ".daybook";

const CONFIG_FILE: &str = "config.toml";

/// Upper bound for `persist_attempts`
pub const MAX_PERSIST_ATTEMPTS: u32 = 10;

/// Upper bound for `persist_backoff_ms`
pub const MAX_PERSIST_BACKOFF_MS: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Attempts at writing the metadata document before giving up
    #[serde(default = "default_persist_attempts")]
    pub persist_attempts: u32,
    /// Delay before the first retry; doubled after each failed attempt
    #[serde(default = "default_persist_backoff_ms")]
    pub persist_backoff_ms: u64,
    pub created: DateTime<Utc>,
}

fn default_persist_attempts() -> u32 {
    3
}

fn default_persist_backoff_ms() -> u64 {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            persist_attempts: default_persist_attempts(),
            persist_backoff_ms: default_persist_backoff_ms(),
            created: Utc::now(),
        }
    }

    /// Load config from .daybook/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(DAYBOOK_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DaybookError::NotDaybookDirectory(path.to_path_buf())
            } else {
                DaybookError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to .daybook/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let daybook_dir = path.join(DAYBOOK_DIR);
        let config_path = daybook_dir.join(CONFIG_FILE);

        if !daybook_dir.exists() {
            fs::create_dir(&daybook_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Check that values stay within the supported ranges
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PERSIST_ATTEMPTS).contains(&self.persist_attempts) {
            return Err(DaybookError::Config(format!(
                "persist_attempts must be between 1 and {}",
                MAX_PERSIST_ATTEMPTS
            )));
        }
        if self.persist_backoff_ms > MAX_PERSIST_BACKOFF_MS {
            return Err(DaybookError::Config(format!(
                "persist_backoff_ms must be at most {}",
                MAX_PERSIST_BACKOFF_MS
            )));
        }
        Ok(())
    }
}
