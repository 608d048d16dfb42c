//! Config management use case

use crate::error::{DaybookError, Result};
use crate::infrastructure::{Config, DiaryRepository, FileSystemRepository};

/// Keys accepted by `get` and `set`
pub const CONFIG_KEYS: [&str; 3] = ["persist_attempts", "persist_backoff_ms", "created"];

/// Service for managing diary configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "persist_attempts" => Ok(config.persist_attempts.to_string()),
            "persist_backoff_ms" => Ok(config.persist_backoff_ms.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "persist_attempts" => {
                config.persist_attempts = parse_number(key, value)?;
            }
            "persist_backoff_ms" => {
                config.persist_backoff_ms = parse_number(key, value)?;
            }
            "created" => {
                return Err(DaybookError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => return Err(unknown_key(key)),
        }

        config.validate()?;
        self.repository.save_config(&config)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| DaybookError::Config(format!("Invalid value for {}: '{}'", key, value)))
}

fn unknown_key(key: &str) -> DaybookError {
    DaybookError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::init;
    use tempfile::TempDir;

    fn service() -> (TempDir, ConfigService) {
        let temp = TempDir::new().unwrap();
        init(temp.path()).unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        (temp, ConfigService::new(repo))
    }

    #[test]
    fn test_get_and_set() {
        let (_temp, service) = service();
        assert_eq!(service.get("persist_attempts").unwrap(), "3");

        service.set("persist_attempts", "5").unwrap();
        service.set("persist_backoff_ms", "0").unwrap();

        assert_eq!(service.get("persist_attempts").unwrap(), "5");
        assert_eq!(service.list().unwrap().persist_backoff_ms, 0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let (_temp, service) = service();
        assert!(service.set("persist_attempts", "0").is_err());
        assert!(service.set("persist_attempts", "11").is_err());
        assert!(service.set("persist_backoff_ms", "60000").is_err());
        assert_eq!(service.get("persist_attempts").unwrap(), "3");
        assert!(service.set("persist_attempts", "many").is_err());
        assert!(service.set("created", "2020-01-01T00:00:00Z").is_err());
        assert!(service.get("mode").is_err());
    }
}
