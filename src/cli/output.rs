//! Output formatting utilities

use crate::application::{Action, ExportReport, RestoreReport, RestoreSource};
use crate::domain::Note;

/// Format a list of notes for display, in stored order
pub fn format_note_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No saved notes".to_string();
    }

    let width = notes.iter().map(|n| n.id.len()).max().unwrap_or(0);
    let mut output = String::new();
    for note in notes {
        output.push_str(&format!("{:>width$}  {}\n", note.id, note.text, width = width));
    }
    output
}

/// Format whether an action is enabled, as a checkbox line
pub fn format_action_state(action: Action, enabled: bool) -> String {
    let mark = if enabled { "x" } else { " " };
    format!("[{}] {}", mark, action)
}

pub fn format_export_report(report: &ExportReport) -> String {
    if report.is_noop() {
        return "No notes on the page, nothing exported".to_string();
    }

    let mut output = format!(
        "Saved {} note(s), deleted {} from the page",
        report.exported, report.deleted
    );
    if !report.clipboard_written {
        output.push_str("\nWarning: clipboard copy failed (notes are still saved)");
    }
    for (id, reason) in &report.failed {
        output.push_str(&format!("\nWarning: could not delete note {}: {}", id, reason));
    }
    output
}

pub fn format_restore_report(report: &RestoreReport) -> String {
    let source = match report.source {
        RestoreSource::Store => "store",
        RestoreSource::Clipboard => "clipboard",
    };

    if report.is_noop() {
        return format!("Nothing to restore from {}", source);
    }

    let mut output = format!(
        "Restored {} of {} note(s) from {}",
        report.added, report.attempted, source
    );
    for (text, reason) in &report.failed {
        output.push_str(&format!("\nWarning: could not add '{}': {}", text, reason));
    }
    output
}
