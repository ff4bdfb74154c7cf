//! Page collaborators: cross-context messaging and the note mutation endpoint

use crate::domain::{Note, NoteParser};
use crate::error::{NoteSyncError, RequestFailure, Result};
use crate::infrastructure::markup;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Messages understood by the page context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "camelCase")]
pub enum PageRequest {
    GetNotes,
    RefreshPage,
    /// Any request name the page does not recognize
    #[serde(other)]
    Unknown,
}

/// Reply from the page context. `refreshPage` and unknown requests reply with no notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Note>>,
}

/// Request/response channel to the active page
#[async_trait]
pub trait PageChannel: Send + Sync {
    async fn send(&self, request: PageRequest) -> Result<PageResponse>;

    /// Notes currently rendered on the page, in display order
    async fn get_notes(&self) -> Result<Vec<Note>> {
        let response = self.send(PageRequest::GetNotes).await?;
        Ok(response.notes.unwrap_or_default())
    }

    async fn refresh_page(&self) -> Result<()> {
        self.send(PageRequest::RefreshPage).await.map(|_| ())
    }
}

/// Outcome of one add or delete call
pub type RequestOutcome = std::result::Result<(), RequestFailure>;

/// Remote service that mutates the notes shown on the page
#[async_trait]
pub trait PageEndpoint: Send + Sync {
    /// Add a note; the page inserts it at the top
    async fn add_note(&self, text: &str) -> RequestOutcome;

    async fn delete_note(&self, id: &str) -> RequestOutcome;
}

/// A single mutation call against the page endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageMutation<'a> {
    Add { text: &'a str },
    Delete { id: &'a str },
}

impl PageMutation<'_> {
    /// Query string for this call
    pub fn query(&self) -> String {
        match self {
            PageMutation::Add { text } => format!(
                "ajax=1&method=addNote&text={}&id=0",
                urlencoding::encode(text)
            ),
            PageMutation::Delete { id } => {
                format!("ajax=1&method=deleteNote&id={}", urlencoding::encode(id))
            }
        }
    }
}

/// Page and endpoint reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpPage {
    base_url: String,
    timeout_secs: u64,
    client: Client,
}

impl HttpPage {
    /// Create with a base URL and a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| NoteSyncError::Page(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HttpPage {
            base_url: base_url.into(),
            timeout_secs,
            client,
        })
    }

    fn mutation_url(&self, mutation: &PageMutation<'_>) -> String {
        format!("{}?{}", self.base_url, mutation.query())
    }

    fn classify(&self, error: reqwest::Error) -> RequestFailure {
        if error.is_timeout() {
            RequestFailure::TimedOut(self.timeout_secs)
        } else if let Some(status) = error.status() {
            RequestFailure::Status(status.as_u16())
        } else {
            RequestFailure::Transport(error.to_string())
        }
    }

    async fn get(&self, url: &str) -> std::result::Result<String, RequestFailure> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestFailure::Status(status.as_u16()));
        }

        response.text().await.map_err(|e| self.classify(e))
    }

    async fn mutate(&self, mutation: PageMutation<'_>) -> RequestOutcome {
        self.get(&self.mutation_url(&mutation)).await.map(|_| ())
    }
}

#[async_trait]
impl PageChannel for HttpPage {
    async fn send(&self, request: PageRequest) -> Result<PageResponse> {
        match request {
            PageRequest::GetNotes => {
                let html = self
                    .get(&self.base_url)
                    .await
                    .map_err(|e| NoteSyncError::Page(format!("Failed to load page: {}", e)))?;
                let container = markup::extract_container(&html);
                if container.is_none() {
                    tracing::debug!("page has no note container");
                }
                Ok(PageResponse {
                    notes: Some(NoteParser::parse_all(container.as_ref())),
                })
            }
            PageRequest::RefreshPage => {
                tracing::info!("reloading page");
                self.get(&self.base_url)
                    .await
                    .map_err(|e| NoteSyncError::Page(format!("Failed to reload page: {}", e)))?;
                Ok(PageResponse::default())
            }
            PageRequest::Unknown => {
                tracing::debug!("ignoring unrecognized page request");
                Ok(PageResponse::default())
            }
        }
    }
}

#[async_trait]
impl PageEndpoint for HttpPage {
    async fn add_note(&self, text: &str) -> RequestOutcome {
        self.mutate(PageMutation::Add { text }).await
    }

    async fn delete_note(&self, id: &str) -> RequestOutcome {
        tracing::info!(id, "deleting note");
        self.mutate(PageMutation::Delete { id }).await
    }
}
