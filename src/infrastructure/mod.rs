//! Infrastructure layer - Page, clipboard and storage collaborators

pub mod clipboard;
pub mod config;
pub mod markup;
pub mod page;
pub mod repository;
pub mod store;

pub use clipboard::{ClipboardBackend, ClipboardChannel, CommandClipboard, StagingSurface};
pub use config::Config;
pub use page::{HttpPage, PageChannel, PageEndpoint, PageRequest, PageResponse, RequestOutcome};
pub use repository::{FileSystemRepository, HomeRepository};
pub use store::{JsonFileStore, KeyValueStore, SnapshotStore, NOTES_KEY};
