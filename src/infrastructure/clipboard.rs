//! System clipboard access through a scoped staging surface

use crate::domain::trimmed_lines;
use crate::error::{NoteSyncError, Result};
use std::fs::{self, File};
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

/// Transient staging area that mediates one clipboard transfer.
/// The backing file is removed when the surface is dropped, on every exit path.
pub struct StagingSurface {
    file: NamedTempFile,
}

impl StagingSurface {
    /// Acquire a fresh, empty surface
    pub fn acquire() -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("notesync-clipboard-")
            .tempfile()
            .map_err(|e| NoteSyncError::Clipboard(format!("Failed to stage clipboard: {}", e)))?;
        Ok(StagingSurface { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Replace the staged text
    pub fn fill(&mut self, text: &str) -> Result<()> {
        let file = self.file.as_file_mut();
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(text.as_bytes())?;
        file.sync_all()?;
        Ok(())
    }

    /// Current staged text
    pub fn contents(&self) -> Result<String> {
        Ok(fs::read_to_string(self.file.path())?)
    }

    /// Independent handle to the staged file, for wiring into a child process
    pub fn handle(&self) -> Result<File> {
        Ok(self.file.reopen()?)
    }
}

impl Drop for StagingSurface {
    fn drop(&mut self) {
        tracing::trace!(path = %self.file.path().display(), "releasing clipboard staging surface");
    }
}

/// Platform copy and paste commands, operating on a staged surface
pub trait ClipboardBackend: Send + Sync {
    /// Copy the surface's contents to the clipboard
    fn copy(&self, surface: &StagingSurface) -> Result<()>;

    /// Replace the surface's contents with the clipboard text
    fn paste(&self, surface: &mut StagingSurface) -> Result<()>;
}

/// Clipboard driven by external commands such as `pbcopy` / `pbpaste`
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    copy_command: String,
    paste_command: String,
}

impl CommandClipboard {
    pub fn new(copy_command: impl Into<String>, paste_command: impl Into<String>) -> Self {
        CommandClipboard {
            copy_command: copy_command.into(),
            paste_command: paste_command.into(),
        }
    }

    /// Default copy command for this platform
    pub fn default_copy_command() -> &'static str {
        if cfg!(target_os = "macos") {
            "pbcopy"
        } else if cfg!(windows) {
            "clip"
        } else {
            "xclip -selection clipboard"
        }
    }

    /// Default paste command for this platform
    pub fn default_paste_command() -> &'static str {
        if cfg!(target_os = "macos") {
            "pbpaste"
        } else if cfg!(windows) {
            "powershell -NoProfile -Command Get-Clipboard"
        } else {
            "xclip -selection clipboard -o"
        }
    }

    fn build(command: &str) -> Result<Command> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| NoteSyncError::Clipboard("Clipboard command is empty".to_string()))?;

        let mut cmd = Command::new(program);
        cmd.args(parts);
        Ok(cmd)
    }

    fn run(command: &str, mut cmd: Command) -> Result<()> {
        let status = cmd
            .stderr(Stdio::null())
            .status()
            .map_err(|e| NoteSyncError::Clipboard(format!("Failed to run '{}': {}", command, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(NoteSyncError::Clipboard(format!(
                "'{}' exited with {}",
                command, status
            )))
        }
    }
}

impl ClipboardBackend for CommandClipboard {
    fn copy(&self, surface: &StagingSurface) -> Result<()> {
        let mut cmd = Self::build(&self.copy_command)?;
        cmd.stdin(Stdio::from(surface.handle()?)).stdout(Stdio::null());
        Self::run(&self.copy_command, cmd)
    }

    fn paste(&self, surface: &mut StagingSurface) -> Result<()> {
        let mut cmd = Self::build(&self.paste_command)?;
        cmd.stdin(Stdio::null()).stdout(Stdio::from(surface.handle()?));
        Self::run(&self.paste_command, cmd)
    }
}

/// Plain-text clipboard channel used by the sync workflows
pub struct ClipboardChannel<'a> {
    backend: &'a dyn ClipboardBackend,
}

impl<'a> ClipboardChannel<'a> {
    pub fn new(backend: &'a dyn ClipboardBackend) -> Self {
        ClipboardChannel { backend }
    }

    /// Place text on the clipboard. Failures are logged, never escalated.
    /// Returns whether the copy went through.
    pub fn write(&self, text: &str) -> bool {
        let result = StagingSurface::acquire().and_then(|mut surface| {
            surface.fill(text)?;
            self.backend.copy(&surface)
        });

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to copy text to clipboard: {}", e);
                false
            }
        }
    }

    /// Raw clipboard text, possibly empty
    pub fn read(&self) -> Result<String> {
        let mut surface = StagingSurface::acquire()?;
        self.backend.paste(&mut surface)?;
        surface.contents()
    }

    /// Trimmed non-empty clipboard lines in order. A failed read yields no lines.
    pub fn read_lines(&self) -> Vec<String> {
        match self.read() {
            Ok(text) => trimmed_lines(&text),
            Err(e) => {
                tracing::warn!("Failed to read text from clipboard: {}", e);
                Vec::new()
            }
        }
    }
}
