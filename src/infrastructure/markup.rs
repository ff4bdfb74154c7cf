//! Page inspection: locating note elements in page markup
//!
//! The notes page renders each note as
//! `<div data-id="ID"><div class="notetext"><p>TEXT@ 3:15 pm</p></div></div>`
//! inside the first element carrying the `note-add` class. The scanner tracks
//! element nesting so a note's id comes from its real parent element and only
//! notes inside that container are reported.

use crate::domain::{NoteContainer, RawNoteElement};
use regex::{Captures, Regex};
use std::sync::OnceLock;

const CONTAINER_CLASS: &str = "note-add";
const NOTE_TEXT_CLASS: &str = "notetext";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Comments, doctypes and start/end tags. Quoted attribute values may contain `>`.
fn token_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r#"(?s)<!--.*?-->|<![^>]*>|<(/?)([a-zA-Z][a-zA-Z0-9:-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#,
        )
        .unwrap()
    })
}

fn attribute_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
    })
}

fn entity_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]*);").unwrap()
    })
}

/// A start tag's name and the attributes this scanner cares about
#[derive(Debug, Default)]
struct StartTag {
    name: String,
    classes: Vec<String>,
    data_id: Option<String>,
    self_closing: bool,
}

impl StartTag {
    fn parse(name: &str, attributes: &str) -> Self {
        let mut tag = StartTag {
            name: name.to_ascii_lowercase(),
            self_closing: attributes.trim_end().ends_with('/'),
            ..Default::default()
        };

        for captures in attribute_regex().captures_iter(attributes) {
            let value = captures
                .get(2)
                .or_else(|| captures.get(3))
                .or_else(|| captures.get(4))
                .map_or("", |m| m.as_str());

            match captures[1].to_ascii_lowercase().as_str() {
                "class" if tag.classes.is_empty() => {
                    tag.classes = value.split_whitespace().map(str::to_string).collect();
                }
                "data-id" if tag.data_id.is_none() => {
                    tag.data_id = Some(decode_entities(value));
                }
                _ => {}
            }
        }

        tag
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// An element still open at the current scan position
struct OpenElement {
    name: String,
    data_id: Option<String>,
}

/// A `notetext` element being collected
struct PendingNote {
    depth: usize,
    id: Option<String>,
    paragraph_depth: Option<usize>,
    text: Option<String>,
    finished: bool,
}

impl PendingNote {
    fn collecting_text(&self) -> bool {
        !self.finished && self.paragraph_depth.is_some()
    }

    fn awaiting_paragraph(&self) -> bool {
        !self.finished && self.paragraph_depth.is_none()
    }
}

/// Locate the note container and its note elements, in document order.
/// Returns None when the page has no note container.
pub fn extract_container(html: &str) -> Option<NoteContainer> {
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut container_depth: Option<usize> = None;
    let mut notes: Vec<PendingNote> = Vec::new();
    let mut cursor = 0;

    while let Some(captures) = token_regex().captures_at(html, cursor) {
        let token = captures.get(0)?;
        append_text(&mut notes, &html[cursor..token.start()]);
        cursor = token.end();

        let Some(name) = captures.get(2) else {
            // Comment or doctype
            continue;
        };

        if !captures[1].is_empty() {
            let name = name.as_str().to_ascii_lowercase();
            let Some(index) = stack.iter().rposition(|e| e.name == name) else {
                continue;
            };
            stack.truncate(index);
            close_from(&mut notes, index);
            if container_depth.is_some_and(|depth| depth >= index) {
                break;
            }
            continue;
        }

        let tag = StartTag::parse(name.as_str(), captures.get(3).map_or("", |m| m.as_str()));
        let depth = stack.len();

        if container_depth.is_none() {
            if tag.has_class(CONTAINER_CLASS) {
                container_depth = Some(depth);
            }
        } else if tag.has_class(NOTE_TEXT_CLASS) {
            notes.push(PendingNote {
                depth,
                id: stack.last().and_then(|parent| parent.data_id.clone()),
                paragraph_depth: None,
                text: None,
                finished: false,
            });
        } else if tag.name == "p" {
            for note in notes.iter_mut().filter(|n| n.awaiting_paragraph()) {
                note.paragraph_depth = Some(depth);
                note.text = Some(String::new());
            }
        }

        if tag.self_closing || VOID_ELEMENTS.contains(&tag.name.as_str()) {
            // A self-closed container or note element holds nothing
            if container_depth == Some(depth) {
                break;
            }
            close_from(&mut notes, depth);
            continue;
        }

        if RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) {
            let closing = format!("</{}", tag.name);
            let end = html[cursor..]
                .to_ascii_lowercase()
                .find(&closing)
                .map_or(html.len(), |offset| cursor + offset);
            append_text(&mut notes, &html[cursor..end]);
            cursor = end;
        }

        stack.push(OpenElement {
            name: tag.name,
            data_id: tag.data_id,
        });
    }

    container_depth?;

    Some(NoteContainer {
        elements: notes
            .into_iter()
            .map(|note| RawNoteElement {
                id: note.id,
                text: note.text,
            })
            .collect(),
    })
}

fn append_text(notes: &mut [PendingNote], raw: &str) {
    if raw.is_empty() {
        return;
    }
    let mut decoded: Option<String> = None;
    for note in notes.iter_mut().filter(|n| n.collecting_text()) {
        let text = decoded.get_or_insert_with(|| decode_entities(raw));
        if let Some(buffer) = note.text.as_mut() {
            buffer.push_str(text);
        }
    }
}

/// Finish every note whose element or paragraph sat at `depth` or deeper
fn close_from(notes: &mut [PendingNote], depth: usize) {
    for note in notes.iter_mut().filter(|n| !n.finished) {
        if note.depth >= depth || note.paragraph_depth.is_some_and(|p| p >= depth) {
            note.finished = true;
        }
    }
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "hellip" => '\u{2026}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "euro" => '\u{20ac}',
        _ => return None,
    };
    Some(c)
}

/// Decode character references in one pass; unknown references are kept as written
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    entity_regex()
        .replace_all(text, |captures: &Captures| {
            let reference = &captures[1];
            let decoded = if let Some(hex) = reference
                .strip_prefix("#x")
                .or_else(|| reference.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(decimal) = reference.strip_prefix('#') {
                decimal.parse().ok().and_then(char::from_u32)
            } else {
                named_entity(reference)
            };

            decoded.map_or_else(|| captures[0].to_string(), String::from)
        })
        .into_owned()
}
