//! Export-and-clear and restore workflows
//!
//! Every collaborator is passed in explicitly. Steps run strictly one after
//! another; the snapshot commit is awaited and must succeed before any note
//! is deleted from the page.

use crate::domain::{replay_order, OrderedNoteCollection};
use crate::error::{NoteSyncError, RequestFailure, Result};
use crate::infrastructure::{
    ClipboardBackend, ClipboardChannel, KeyValueStore, PageChannel, PageEndpoint, SnapshotStore,
};
use std::fmt;

/// User-facing trigger affordances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ExportAndClear,
    RestoreFromStore,
    RestoreFromClipboard,
}

impl Action {
    pub const ALL: [Action; 3] = [
        Action::ExportAndClear,
        Action::RestoreFromStore,
        Action::RestoreFromClipboard,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::ExportAndClear => "export-and-clear",
            Action::RestoreFromStore => "restore-from-store",
            Action::RestoreFromClipboard => "restore-from-clipboard",
        };
        f.write_str(name)
    }
}

/// The surface that triggered a workflow
pub trait UiSurface: Send + Sync {
    fn set_action_enabled(&self, action: Action, enabled: bool);

    /// Tear the surface down once a workflow has finished
    fn close(&self);

    fn show_error(&self, error: &NoteSyncError);
}

/// Progress of an export-and-clear run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExportStage {
    Idle,
    NotesFetched,
    ClipboardWritten,
    StoreCommitted,
    PageCleared,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub stage: ExportStage,
    pub exported: usize,
    pub clipboard_written: bool,
    pub deleted: usize,
    pub failed: Vec<(String, RequestFailure)>,
}

impl ExportReport {
    fn nothing_to_do() -> Self {
        ExportReport {
            stage: ExportStage::Idle,
            exported: 0,
            clipboard_written: false,
            deleted: 0,
            failed: Vec::new(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.stage == ExportStage::Idle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreSource {
    Store,
    Clipboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    pub source: RestoreSource,
    pub attempted: usize,
    pub added: usize,
    pub failed: Vec<(String, RequestFailure)>,
}

impl RestoreReport {
    pub fn is_noop(&self) -> bool {
        self.attempted == 0
    }
}

/// Which affordances currently have their precondition met
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Availability {
    pub export_and_clear: bool,
    pub restore_from_store: bool,
    pub restore_from_clipboard: bool,
}

impl Availability {
    pub fn is_enabled(&self, action: Action) -> bool {
        match action {
            Action::ExportAndClear => self.export_and_clear,
            Action::RestoreFromStore => self.restore_from_store,
            Action::RestoreFromClipboard => self.restore_from_clipboard,
        }
    }
}

pub struct SyncWorkflow<'a> {
    page: &'a dyn PageChannel,
    endpoint: &'a dyn PageEndpoint,
    store: SnapshotStore<'a>,
    clipboard: ClipboardChannel<'a>,
    surface: &'a dyn UiSurface,
}

impl<'a> SyncWorkflow<'a> {
    pub fn new(
        page: &'a dyn PageChannel,
        endpoint: &'a dyn PageEndpoint,
        store: &'a dyn KeyValueStore,
        clipboard: &'a dyn ClipboardBackend,
        surface: &'a dyn UiSurface,
    ) -> Self {
        SyncWorkflow {
            page,
            endpoint,
            store: SnapshotStore::new(store),
            clipboard: ClipboardChannel::new(clipboard),
            surface,
        }
    }

    /// Copy the page's notes to the clipboard and the store, then remove them from the page.
    ///
    /// Returns `CommitFailed` without touching the page if the snapshot could not be saved.
    pub async fn export_and_clear(&self) -> Result<ExportReport> {
        let mut stage = ExportStage::Idle;

        let notes = OrderedNoteCollection::new(self.page.get_notes().await?);
        if notes.is_empty() {
            tracing::info!("no notes on page, nothing to export");
            self.surface.close();
            return Ok(ExportReport::nothing_to_do());
        }
        advance(&mut stage, ExportStage::NotesFetched);

        let clipboard_written = match notes.to_clipboard_text() {
            Ok(text) => self.clipboard.write(&text),
            Err(e) => {
                tracing::warn!("Skipping clipboard copy: {}", e);
                false
            }
        };
        advance(&mut stage, ExportStage::ClipboardWritten);

        if let Err(e) = self.store.commit(&notes).await {
            tracing::error!("{}", e);
            self.surface.show_error(&e);
            return Err(e);
        }
        advance(&mut stage, ExportStage::StoreCommitted);

        let mut deleted = 0;
        let mut failed = Vec::new();
        for note in notes.notes() {
            match self.endpoint.delete_note(&note.id).await {
                Ok(()) => deleted += 1,
                Err(e) => {
                    tracing::warn!(id = %note.id, "Failed to delete note: {}", e);
                    failed.push((note.id.clone(), e));
                }
            }
        }
        advance(&mut stage, ExportStage::PageCleared);

        self.refresh_and_close().await;
        advance(&mut stage, ExportStage::Done);

        tracing::info!(exported = notes.len(), deleted, "export finished");
        Ok(ExportReport {
            stage,
            exported: notes.len(),
            clipboard_written,
            deleted,
            failed,
        })
    }

    /// Re-add the stored snapshot to the page in its original order
    pub async fn restore_from_store(&self) -> Result<RestoreReport> {
        let texts: Vec<String> = match self.store.load().await? {
            Some(snapshot) => snapshot.into_notes().into_iter().map(|n| n.text).collect(),
            None => Vec::new(),
        };

        Ok(self.restore(RestoreSource::Store, texts).await)
    }

    /// Re-add each non-empty clipboard line to the page in its original order
    pub async fn restore_from_clipboard(&self) -> Result<RestoreReport> {
        let lines = self.clipboard.read_lines();
        Ok(self.restore(RestoreSource::Clipboard, lines).await)
    }

    /// Check each affordance's precondition and update the surface accordingly
    pub async fn availability(&self) -> Availability {
        let export_and_clear = match self.page.get_notes().await {
            Ok(notes) => !notes.is_empty(),
            Err(e) => {
                tracing::warn!("Cannot read notes from page: {}", e);
                false
            }
        };

        let restore_from_store = match self.store.load().await {
            Ok(snapshot) => snapshot.is_some_and(|s| !s.is_empty()),
            Err(e) => {
                tracing::warn!("Cannot read stored snapshot: {}", e);
                false
            }
        };

        let restore_from_clipboard = !self.clipboard.read_lines().is_empty();

        let availability = Availability {
            export_and_clear,
            restore_from_store,
            restore_from_clipboard,
        };
        for action in Action::ALL {
            self.surface
                .set_action_enabled(action, availability.is_enabled(action));
        }
        availability
    }

    /// `captured` is in display order; the page inserts each addition at the top
    async fn restore(&self, source: RestoreSource, captured: Vec<String>) -> RestoreReport {
        if captured.is_empty() {
            tracing::info!(?source, "nothing to restore");
            self.surface.close();
            return RestoreReport {
                source,
                attempted: 0,
                added: 0,
                failed: Vec::new(),
            };
        }

        let mut added = 0;
        let mut failed = Vec::new();
        for text in replay_order(&captured) {
            match self.endpoint.add_note(&text).await {
                Ok(()) => added += 1,
                Err(e) => {
                    tracing::warn!("Failed to add note '{}': {}", text, e);
                    failed.push((text, e));
                }
            }
        }

        self.refresh_and_close().await;

        tracing::info!(?source, added, "restore finished");
        RestoreReport {
            source,
            attempted: captured.len(),
            added,
            failed,
        }
    }

    async fn refresh_and_close(&self) {
        if let Err(e) = self.page.refresh_page().await {
            tracing::warn!("Failed to refresh page: {}", e);
        }
        self.surface.close();
    }
}

fn advance(stage: &mut ExportStage, next: ExportStage) {
    tracing::debug!(from = ?stage, to = ?next, "export stage");
    *stage = next;
}
