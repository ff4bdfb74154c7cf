//! Durable key-value storage for the notes snapshot

use crate::domain::{Note, OrderedNoteCollection};
use crate::error::{NoteSyncError, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};

/// The single key holding the whole snapshot
pub const NOTES_KEY: &str = "notes";

/// Durable key-value store. `set` replaces the value wholesale and returns once committed.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// Key-value store kept as one JSON object in a file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        JsonFileStore { path }
    }

    async fn read_all(&self) -> Result<Map<String, Value>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&contents)? {
            Value::Object(map) => Ok(map),
            _ => Err(NoteSyncError::Config(format!(
                "Store file is not a JSON object: {}",
                self.path.display()
            ))),
        }
    }
}

/// Replace `path` with `contents` through a temp file in the same directory
fn write_atomically(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(contents)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut map = self.read_all().await?;
        Ok(map.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut map = self.read_all().await?;
        map.insert(key.to_string(), value);

        let contents = serde_json::to_vec_pretty(&Value::Object(map))?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &contents))
            .await
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))??;

        tracing::debug!(key, path = %self.path.display(), "store committed");
        Ok(())
    }
}

/// Typed view over the `notes` key
pub struct SnapshotStore<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> SnapshotStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        SnapshotStore { store }
    }

    /// Load the stored snapshot. None if nothing was ever saved.
    pub async fn load(&self) -> Result<Option<OrderedNoteCollection>> {
        let Some(value) = self.store.get(NOTES_KEY).await? else {
            return Ok(None);
        };

        if value.is_null() {
            return Ok(None);
        }

        let stored: Vec<Note> = serde_json::from_value(value)?;
        let total = stored.len();
        let notes: Vec<Note> = stored
            .into_iter()
            .filter_map(|note| Note::new(note.id, note.text))
            .collect();
        if notes.len() < total {
            tracing::warn!(
                skipped = total - notes.len(),
                "ignoring stored notes with empty id or text"
            );
        }

        Ok(Some(OrderedNoteCollection::new(notes)))
    }

    /// Replace the snapshot. Any failure is reported as a commit failure.
    pub async fn commit(&self, notes: &OrderedNoteCollection) -> Result<()> {
        let value = serde_json::to_value(notes.notes())
            .map_err(|e| NoteSyncError::CommitFailed(e.to_string()))?;

        self.store
            .set(NOTES_KEY, value)
            .await
            .map_err(|e| match e {
                NoteSyncError::CommitFailed(reason) => NoteSyncError::CommitFailed(reason),
                other => NoteSyncError::CommitFailed(other.to_string()),
            })
    }
}
