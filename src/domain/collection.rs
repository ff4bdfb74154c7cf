//! Ordered note collections and replay ordering

use crate::domain::note::Note;
use crate::error::{NoteSyncError, Result};

/// Order in which items must be re-inserted into a target that inserts at the top,
/// so that the final visible order equals `captured`. Never mutates its input.
pub fn replay_order<T: Clone>(captured: &[T]) -> Vec<T> {
    captured.iter().rev().cloned().collect()
}

/// Split clipboard text into trimmed, non-empty lines, keeping their order
pub fn trimmed_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Notes in page display order, top to bottom
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedNoteCollection {
    notes: Vec<Note>,
}

impl OrderedNoteCollection {
    pub fn new(notes: Vec<Note>) -> Self {
        OrderedNoteCollection { notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The notes reversed for front-inserting replay. The collection is left untouched.
    pub fn to_replay_order(&self) -> Vec<Note> {
        replay_order(&self.notes)
    }

    /// Note texts joined by newlines in display order, without a trailing newline
    pub fn to_clipboard_text(&self) -> Result<String> {
        if self.notes.is_empty() {
            return Err(NoteSyncError::EmptyCollection);
        }

        Ok(self
            .notes
            .iter()
            .map(|note| note.text.as_str())
            .collect::<Vec<_>>()
            .join("\n"))
    }

    pub fn into_notes(self) -> Vec<Note> {
        self.notes
    }
}

impl From<Vec<Note>> for OrderedNoteCollection {
    fn from(notes: Vec<Note>) -> Self {
        OrderedNoteCollection::new(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(texts: &[&str]) -> OrderedNoteCollection {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| Note::new((i + 1).to_string(), text).unwrap())
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_replay_order_reverses() {
        let notes = collection(&["x", "y", "z"]);
        let texts: Vec<String> = notes.to_replay_order().into_iter().map(|n| n.text).collect();
        assert_eq!(texts, vec!["z", "y", "x"]);
    }

    #[test]
    fn test_replay_order_is_pure() {
        let notes = collection(&["x", "y"]);
        let before = notes.clone();
        let _ = notes.to_replay_order();
        let _ = notes.to_replay_order();
        assert_eq!(notes, before);
    }

    #[test]
    fn test_replay_order_twice_restores_original() {
        let notes = collection(&["a", "b", "c", "d"]);
        let round_trip = replay_order(&notes.to_replay_order());
        assert_eq!(round_trip, notes.notes());
    }

    #[test]
    fn test_clipboard_text_joins_in_order() {
        assert_eq!(collection(&["a", "b"]).to_clipboard_text().unwrap(), "a\nb");
        assert_eq!(collection(&["only"]).to_clipboard_text().unwrap(), "only");
    }

    #[test]
    fn test_clipboard_text_empty_fails() {
        let result = OrderedNoteCollection::default().to_clipboard_text();
        assert!(matches!(result, Err(NoteSyncError::EmptyCollection)));
    }

    #[test]
    fn test_trimmed_lines() {
        assert_eq!(trimmed_lines("a\nb\n\nc"), vec!["a", "b", "c"]);
        assert_eq!(trimmed_lines("  a \r\n\t\n b\n"), vec!["a", "b"]);
        assert!(trimmed_lines("").is_empty());
        assert!(trimmed_lines("\n  \n").is_empty());
    }
}
