//! Note records as captured from the page

use serde::{Deserialize, Serialize};

/// A single exported note with its page-assigned identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub text: String,
}

impl Note {
    /// Build a note, trimming the text. Returns None if either field ends up empty.
    pub fn new(id: impl Into<String>, text: impl AsRef<str>) -> Option<Self> {
        let id = id.into();
        let text = text.as_ref().trim();

        if id.trim().is_empty() || text.is_empty() {
            return None;
        }

        Some(Note {
            id,
            text: text.to_string(),
        })
    }
}

/// Unparsed note markup as exposed by page inspection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawNoteElement {
    /// Identifier attribute on the note's container
    pub id: Option<String>,
    /// Text content of the nested paragraph, including the timestamp suffix
    pub text: Option<String>,
}

impl RawNoteElement {
    pub fn new(id: Option<&str>, text: Option<&str>) -> Self {
        RawNoteElement {
            id: id.map(str::to_string),
            text: text.map(str::to_string),
        }
    }
}

/// The page region holding note elements, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteContainer {
    pub elements: Vec<RawNoteElement>,
}
