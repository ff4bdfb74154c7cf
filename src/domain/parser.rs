//! Note parsing from raw page elements

use crate::domain::note::{Note, NoteContainer, RawNoteElement};
use regex::Regex;
use std::sync::OnceLock;

/// Regex for note text followed by a timestamp: `<body>@ H:MM am|pm<anything>`.
/// The body is taken from the line holding the timestamp.
fn note_text_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\s*(.*)@\s\d{1,2}:\d{2}\s(?i:[ap]m)").unwrap())
}

/// Extract the note body preceding the timestamp, trimmed.
/// Returns None if the text has no timestamp or the body is empty.
pub fn extract_body(raw_text: &str) -> Option<String> {
    let captures = note_text_regex().captures(raw_text)?;
    let body = captures.get(1)?.as_str().trim();

    if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}

pub struct NoteParser;

impl NoteParser {
    /// Parse a single raw element. Elements without an id or a well-formed text are skipped.
    pub fn parse(element: &RawNoteElement) -> Option<Note> {
        let id = element.id.as_deref()?;
        let body = extract_body(element.text.as_deref()?)?;

        Note::new(id, body)
    }

    /// Parse every element of the container in document order, dropping unparseable ones
    pub fn parse_all(container: Option<&NoteContainer>) -> Vec<Note> {
        let Some(container) = container else {
            return Vec::new();
        };

        container
            .elements
            .iter()
            .filter_map(|element| {
                let note = Self::parse(element);
                if note.is_none() {
                    tracing::debug!(id = ?element.id, "skipping unparseable note element");
                }
                note
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(id: Option<&str>, text: Option<&str>) -> RawNoteElement {
        RawNoteElement::new(id, text)
    }

    #[test]
    fn test_parse_strips_timestamp() {
        let note = NoteParser::parse(&element(Some("1"), Some("buy milk@ 3:15 pm"))).unwrap();
        assert_eq!(note, Note::new("1", "buy milk").unwrap());
    }

    #[test]
    fn test_parse_trims_body_and_ignores_suffix() {
        let note =
            NoteParser::parse(&element(Some("2"), Some("  water plants  @ 11:05 am (edited)")))
                .unwrap();
        assert_eq!(note.text, "water plants");
    }

    #[test]
    fn test_parse_meridiem_case_insensitive() {
        assert!(NoteParser::parse(&element(Some("3"), Some("stretch@ 9:00 PM"))).is_some());
        assert!(NoteParser::parse(&element(Some("3"), Some("stretch@ 9:00 Am"))).is_some());
    }

    #[test]
    fn test_parse_keeps_last_timestamp_split() {
        let note =
            NoteParser::parse(&element(Some("4"), Some("meet @ 2:30 pm cafe@ 1:00 pm"))).unwrap();
        assert_eq!(note.text, "meet @ 2:30 pm cafe");
    }

    #[test]
    fn test_parse_multiline_keeps_timestamp_line() {
        let note =
            NoteParser::parse(&element(Some("5"), Some("line one\nline two@ 4:45 pm"))).unwrap();
        assert_eq!(note.text, "line two");

        let note = NoteParser::parse(&element(Some("6"), Some("  \n  indented@ 8:00 am\nfooter")))
            .unwrap();
        assert_eq!(note.text, "indented");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        // Missing id
        assert!(NoteParser::parse(&element(None, Some("x@ 3:15 pm"))).is_none());
        // Missing text
        assert!(NoteParser::parse(&element(Some("1"), None)).is_none());
        // No timestamp
        assert!(NoteParser::parse(&element(Some("1"), Some("just text"))).is_none());
        // Three-digit hour
        assert!(NoteParser::parse(&element(Some("1"), Some("x@ 123:15 pm"))).is_none());
        // Single-digit minute
        assert!(NoteParser::parse(&element(Some("1"), Some("x@ 3:5 pm"))).is_none());
        // Empty body
        assert!(NoteParser::parse(&element(Some("1"), Some("   @ 3:15 pm"))).is_none());
    }

    #[test]
    fn test_parse_all_filters_and_preserves_order() {
        let container = NoteContainer {
            elements: vec![
                element(Some("1"), Some("first@ 1:00 pm")),
                element(None, Some("orphan@ 1:05 pm")),
                element(Some("3"), Some("third@ 1:10 pm")),
                element(Some("4"), Some("no timestamp")),
                element(Some("5"), Some("fifth@ 1:20 pm")),
            ],
        };

        let notes = NoteParser::parse_all(Some(&container));
        let ids: Vec<&str> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "5"]);
    }

    #[test]
    fn test_parse_all_absent_container() {
        assert!(NoteParser::parse_all(None).is_empty());
        assert!(NoteParser::parse_all(Some(&NoteContainer::default())).is_empty());
    }
}
