//! Terminal stand-in for the add-on popup

use crate::application::{Action, UiSurface};
use crate::cli::output::format_action_state;
use crate::error::NoteSyncError;
use std::io::{self, Write};
use std::sync::Mutex;

/// Prints each affordance's state as it is decided and reports errors on stderr
#[derive(Debug)]
pub struct TerminalSurface<W: Write + Send = io::Stdout> {
    out: Mutex<W>,
    error_shown: Mutex<bool>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn with_writer(out: W) -> Self {
        TerminalSurface {
            out: Mutex::new(out),
            error_shown: Mutex::new(false),
        }
    }

    /// Whether an error was already reported to the user
    pub fn error_shown(&self) -> bool {
        self.error_shown.lock().map(|shown| *shown).unwrap_or(false)
    }

    pub fn into_writer(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> UiSurface for TerminalSurface<W> {
    fn set_action_enabled(&self, action: Action, enabled: bool) {
        if let Ok(mut out) = self.out.lock() {
            if let Err(e) = writeln!(out, "{}", format_action_state(action, enabled)) {
                tracing::warn!("Failed to print action state: {}", e);
            }
        }
    }

    fn close(&self) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.flush();
        }
        tracing::debug!("surface closed");
    }

    fn show_error(&self, error: &NoteSyncError) {
        eprintln!("{}", error.display_with_suggestions());
        if let Ok(mut shown) = self.error_shown.lock() {
            *shown = true;
        }
    }
}
