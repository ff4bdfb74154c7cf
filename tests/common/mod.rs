#![allow(dead_code)]

use assert_cmd::Command;
use async_trait::async_trait;
use notesync::application::{Action, UiSurface};
use notesync::domain::Note;
use notesync::error::{NoteSyncError, RequestFailure, Result};
use notesync::infrastructure::{
    ClipboardBackend, KeyValueStore, PageChannel, PageEndpoint, PageRequest, PageResponse,
    RequestOutcome, StagingSurface,
};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub fn notesync_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("notesync").unwrap();
    cmd.env("NOTESYNC_HOME", home);
    cmd.env_remove("NOTESYNC_BASE_URL");
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn note(id: &str, text: &str) -> Note {
    Note::new(id, text).unwrap()
}

/// Ordered log of side effects shared by all fakes
#[derive(Clone, Default)]
pub struct Events(Arc<Mutex<Vec<String>>>);

impl Events {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn with_prefix(&self, prefix: &str) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|e| e.starts_with(prefix))
            .collect()
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.all().iter().position(|e| e == event)
    }
}

/// Serve `html` for every request on a local port, recording each request target.
/// Returns the page URL.
pub async fn serve_page(html: &str, events: &Events) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let body = html.to_string();
    let events = events.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            if let Some(target) = request.lines().next().and_then(|l| l.split(' ').nth(1)) {
                events.push(format!("http:{}", target));
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    url
}

pub struct FakePage {
    pub notes: Vec<Note>,
    pub unreachable: bool,
    pub events: Events,
}

impl FakePage {
    pub fn new(notes: Vec<Note>, events: &Events) -> Self {
        FakePage {
            notes,
            unreachable: false,
            events: events.clone(),
        }
    }
}

#[async_trait]
impl PageChannel for FakePage {
    async fn send(&self, request: PageRequest) -> Result<PageResponse> {
        if self.unreachable {
            return Err(NoteSyncError::Page("page unreachable".to_string()));
        }
        match request {
            PageRequest::GetNotes => Ok(PageResponse {
                notes: Some(self.notes.clone()),
            }),
            PageRequest::RefreshPage => {
                self.events.push("refresh");
                Ok(PageResponse::default())
            }
            PageRequest::Unknown => Ok(PageResponse::default()),
        }
    }
}

pub struct FakeEndpoint {
    pub rejected: Vec<String>,
    pub events: Events,
}

impl FakeEndpoint {
    pub fn new(events: &Events) -> Self {
        FakeEndpoint {
            rejected: Vec::new(),
            events: events.clone(),
        }
    }

    fn outcome(&self, key: &str) -> RequestOutcome {
        if self.rejected.iter().any(|r| r == key) {
            Err(RequestFailure::TimedOut(10))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PageEndpoint for FakeEndpoint {
    async fn add_note(&self, text: &str) -> RequestOutcome {
        self.events.push(format!("add:{}", text));
        self.outcome(text)
    }

    async fn delete_note(&self, id: &str) -> RequestOutcome {
        self.events.push(format!("delete:{}", id));
        self.outcome(id)
    }
}

pub struct MemoryStore {
    pub values: Mutex<HashMap<String, Value>>,
    pub reject_writes: bool,
    pub events: Events,
}

impl MemoryStore {
    pub fn new(events: &Events) -> Self {
        MemoryStore {
            values: Mutex::new(HashMap::new()),
            reject_writes: false,
            events: events.clone(),
        }
    }

    pub fn with_notes(notes: &[Note], events: &Events) -> Self {
        let store = Self::new(events);
        store
            .values
            .lock()
            .unwrap()
            .insert("notes".to_string(), serde_json::to_value(notes).unwrap());
        store
    }

    pub fn value(&self, key: &str) -> Option<Value> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        if self.reject_writes {
            self.events.push("commit-rejected");
            return Err(NoteSyncError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only store",
            )));
        }
        self.events.push("commit");
        self.values.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}

pub struct FakeClipboard {
    pub text: Mutex<String>,
    pub broken: bool,
    pub events: Events,
}

impl FakeClipboard {
    pub fn new(text: &str, events: &Events) -> Self {
        FakeClipboard {
            text: Mutex::new(text.to_string()),
            broken: false,
            events: events.clone(),
        }
    }

    pub fn text(&self) -> String {
        self.text.lock().unwrap().clone()
    }
}

impl ClipboardBackend for FakeClipboard {
    fn copy(&self, surface: &StagingSurface) -> Result<()> {
        if self.broken {
            return Err(NoteSyncError::Clipboard("copy command rejected".to_string()));
        }
        self.events.push("clipboard");
        *self.text.lock().unwrap() = surface.contents()?;
        Ok(())
    }

    fn paste(&self, surface: &mut StagingSurface) -> Result<()> {
        if self.broken {
            return Err(NoteSyncError::Clipboard("paste command rejected".to_string()));
        }
        let text = self.text();
        surface.fill(&text)
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    pub enabled: Mutex<HashMap<String, bool>>,
    pub closed: Mutex<bool>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingSurface {
    pub fn is_closed(&self) -> bool {
        *self.closed.lock().unwrap()
    }

    pub fn enabled(&self, action: Action) -> Option<bool> {
        self.enabled.lock().unwrap().get(&action.to_string()).copied()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl UiSurface for RecordingSurface {
    fn set_action_enabled(&self, action: Action, enabled: bool) {
        self.enabled
            .lock()
            .unwrap()
            .insert(action.to_string(), enabled);
    }

    fn close(&self) {
        *self.closed.lock().unwrap() = true;
    }

    fn show_error(&self, error: &NoteSyncError) {
        self.errors.lock().unwrap().push(error.to_string());
    }
}
