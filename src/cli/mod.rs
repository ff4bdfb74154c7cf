//! CLI layer - Command-line interface

pub mod commands;
pub mod output;
pub mod surface;

pub use commands::{Cli, Commands, RestoreFrom};
pub use output::{
    format_action_state, format_export_report, format_note_list, format_restore_report,
};
pub use surface::TerminalSurface;
