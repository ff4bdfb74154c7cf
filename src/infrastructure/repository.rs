//! Notesync home directory

use crate::error::{NoteSyncError, Result};
use crate::infrastructure::config::{Config, CONFIG_FILE};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const SNAPSHOT_FILE: &str = "notes.json";

/// Abstract access to the directory holding config and snapshot
pub trait HomeRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if config.toml exists
    fn is_initialized(&self) -> bool;

    /// Path of the snapshot store file
    fn snapshot_path(&self) -> PathBuf {
        self.root().join(SNAPSHOT_FILE)
    }
}

/// File system implementation of HomeRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Resolve the home directory: NOTESYNC_HOME first, then the platform data directory
    pub fn locate() -> Result<Self> {
        if let Ok(root_path) = std::env::var("NOTESYNC_HOME") {
            return Ok(FileSystemRepository::new(PathBuf::from(root_path)));
        }

        ProjectDirs::from("", "", "notesync")
            .map(|dirs| FileSystemRepository::new(dirs.data_dir().to_path_buf()))
            .ok_or_else(|| {
                NoteSyncError::Config(
                    "Cannot determine a home directory. Set NOTESYNC_HOME.".to_string(),
                )
            })
    }

    /// Resolve the home directory and require it to be initialized
    pub fn discover() -> Result<Self> {
        let repo = Self::locate()?;
        if !repo.is_initialized() {
            return Err(NoteSyncError::NotInitialized(repo.root));
        }
        Ok(repo)
    }
}

impl HomeRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        self.root.join(CONFIG_FILE).is_file()
    }
}
