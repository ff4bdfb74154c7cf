//! Configuration management

use crate::error::{NoteSyncError, Result};
use crate::infrastructure::clipboard::CommandClipboard;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_BASE_URL: &str = "https://www.tomatoid.com/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paste_command: Option<String>,
    pub created: DateTime<Utc>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    /// Create a new config with default values
    pub fn new(base_url: Option<String>) -> Self {
        Config {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            copy_command: None,
            paste_command: None,
            created: Utc::now(),
        }
    }

    /// Load config from config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NoteSyncError::NotInitialized(path.to_path_buf())
            } else {
                NoteSyncError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| NoteSyncError::Config(format!("Failed to parse config.toml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path.join(CONFIG_FILE), contents)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(NoteSyncError::Config(format!(
                "Invalid base_url '{}': must start with http:// or https://",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(NoteSyncError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the page base URL, checking NOTESYNC_BASE_URL first
    pub fn get_base_url(&self) -> String {
        std::env::var("NOTESYNC_BASE_URL").unwrap_or_else(|_| self.base_url.clone())
    }

    pub fn get_copy_command(&self) -> String {
        self.copy_command
            .clone()
            .unwrap_or_else(|| CommandClipboard::default_copy_command().to_string())
    }

    pub fn get_paste_command(&self) -> String {
        self.paste_command
            .clone()
            .unwrap_or_else(|| CommandClipboard::default_paste_command().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_config() {
        let config = Config::new(None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.copy_command.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new(Some("http://localhost:8080/".to_string()));
        config.paste_command = Some("cat clip.txt".to_string());

        config.save_to_dir(temp.path()).unwrap();
        assert!(temp.path().join(CONFIG_FILE).exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        match Config::load_from_dir(temp.path()).unwrap_err() {
            NoteSyncError::NotInitialized(_) => {}
            other => panic!("Expected NotInitialized error, got {:?}", other),
        }
    }

    #[test]
    fn test_timeout_defaults_when_absent() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "base_url = \"https://example.com/\"\ncreated = \"2025-01-17T10:00:00Z\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let temp = TempDir::new().unwrap();
        let config = Config::new(Some("ftp://example.com".to_string()));
        assert!(matches!(
            config.save_to_dir(temp.path()),
            Err(NoteSyncError::Config(_))
        ));
    }

    #[test]
    fn test_clipboard_commands_fall_back_to_platform() {
        let mut config = Config::new(None);
        assert_eq!(
            config.get_copy_command(),
            CommandClipboard::default_copy_command()
        );

        config.copy_command = Some("wl-copy".to_string());
        assert_eq!(config.get_copy_command(), "wl-copy");
    }
}
