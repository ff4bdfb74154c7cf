//! Initialize home use case

use crate::error::{NoteSyncError, Result};
use crate::infrastructure::{Config, FileSystemRepository, HomeRepository};
use std::path::Path;

/// Create config.toml in `path`. Fails if the home is already initialized.
pub fn init(path: &Path, base_url: Option<String>) -> Result<Config> {
    let repo = FileSystemRepository::new(path.to_path_buf());

    if repo.is_initialized() {
        return Err(NoteSyncError::Config(format!(
            "Directory already initialized: {}",
            path.display()
        )));
    }

    let config = Config::new(base_url);
    repo.save_config(&config)?;
    tracing::info!(path = %path.display(), "initialized notesync home");

    Ok(config)
}
