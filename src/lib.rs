//! notesync - Bulk export, clear and restore of page notes
//!
//! Reads the notes rendered on a notes page, saves them to a durable local
//! snapshot and the clipboard, clears them from the page, and later replays
//! them back in their original order.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::NoteSyncError;
