//! Domain layer - Note records, parsing and ordering rules

pub mod collection;
pub mod note;
pub mod parser;

pub use collection::{replay_order, trimmed_lines, OrderedNoteCollection};
pub use note::{Note, NoteContainer, RawNoteElement};
pub use parser::NoteParser;
