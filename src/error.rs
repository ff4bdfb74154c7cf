//! Error types for notesync

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for notesync
#[derive(Debug, Error)]
pub enum NoteSyncError {
    #[error("Not a notesync home: {0}")]
    NotInitialized(PathBuf),

    #[error("Snapshot commit failed, no notes were deleted from the page: {0}")]
    CommitFailed(String),

    #[error("Cannot build clipboard text from an empty note collection")]
    EmptyCollection,

    #[error("Page error: {0}")]
    Page(String),

    #[error("Request failed: {0}")]
    Request(#[from] RequestFailure),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Outcome of a single page mutation call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailure {
    #[error("request timed out after {0}s")]
    TimedOut(u64),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

impl NoteSyncError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            NoteSyncError::NotInitialized(_) => 2,
            NoteSyncError::CommitFailed(_) => 3,
            NoteSyncError::Page(_) | NoteSyncError::Request(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            NoteSyncError::NotInitialized(path) => {
                format!(
                    "Not a notesync home: {}\n\n\
                    Suggestions:\n\
                    • Run 'notesync init' to create the home directory\n\
                    • Set NOTESYNC_HOME environment variable to an initialized directory",
                    path.display()
                )
            }
            NoteSyncError::CommitFailed(reason) => {
                format!(
                    "SNAPSHOT NOT SAVED: {}\n\n\
                    Your notes are still on the page; nothing was deleted.\n\
                    Suggestions:\n\
                    • Check that the notesync home directory is writable\n\
                    • Check free disk space, then run 'notesync export' again",
                    reason
                )
            }
            NoteSyncError::Page(msg) | NoteSyncError::Clipboard(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check the configured page: notesync config base_url\n\
                    • Raise the timeout: notesync config request_timeout_secs 30\n\
                    • Rerun with -v for details",
                    msg
                )
            }
            NoteSyncError::Config(msg) if msg.contains("Unknown config key") => {
                format!(
                    "{}\n\n\
                    Example: notesync config base_url https://www.tomatoid.com/",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using NoteSyncError
pub type Result<T> = std::result::Result<T, NoteSyncError>;
