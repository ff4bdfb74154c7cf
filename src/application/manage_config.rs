//! Config management use case

use crate::error::{NoteSyncError, Result};
use crate::infrastructure::{Config, FileSystemRepository, HomeRepository};

const VALID_KEYS: &str = "base_url, request_timeout_secs, copy_command, paste_command, created";

/// Service for managing notesync configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "base_url" => Ok(config.base_url),
            "request_timeout_secs" => Ok(config.request_timeout_secs.to_string()),
            "copy_command" => Ok(config.get_copy_command()),
            "paste_command" => Ok(config.get_paste_command()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(NoteSyncError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "base_url" => config.base_url = value.to_string(),
            "request_timeout_secs" => {
                config.request_timeout_secs = value.parse().map_err(|_| {
                    NoteSyncError::Config(format!(
                        "Invalid request_timeout_secs '{}': expected a whole number of seconds",
                        value
                    ))
                })?;
            }
            "copy_command" => config.copy_command = Some(value.to_string()),
            "paste_command" => config.paste_command = Some(value.to_string()),
            "created" => {
                return Err(NoteSyncError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(NoteSyncError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
