//! AnkiConnect client.
//!
//! Every action is a POST of `{action, version, params}` to the AnkiConnect
//! endpoint, answered with `{result, error}`.

pub mod wire;

pub use wire::{find_query, ApiNote, NoteFields, NoteOptions};

use note_parser::Note;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// AnkiConnect API version spoken by this client.
pub const API_VERSION: u8 = 6;

/// Default AnkiConnect endpoint.
pub const DEFAULT_URL: &str = "http://localhost:8765";

/// AnkiConnect errors.
#[derive(Debug, thiserror::Error)]
pub enum AnkiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("AnkiConnect HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("AnkiConnect {action} failed: {message}")]
    Api { action: String, message: String },

    #[error("AnkiConnect {action} returned no result")]
    MissingResult { action: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Serialize)]
struct Request<'a, P> {
    action: &'a str,
    version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<P>,
}

#[derive(Debug, Deserialize)]
struct Response<R> {
    result: Option<R>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct NoteParams<'a> {
    note: &'a ApiNote,
}

#[derive(Debug, Serialize)]
struct NotesParams<'a> {
    notes: &'a [ApiNote],
}

#[derive(Debug, Serialize)]
struct QueryParams<'a> {
    query: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateParams<'a> {
    note: NoteUpdate<'a>,
}

#[derive(Debug, Serialize)]
struct NoteUpdate<'a> {
    id: i64,
    fields: &'a NoteFields,
}

/// Answer of `canAddNotesWithErrorDetail` for one note.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanAddResult {
    pub can_add: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Client for a running AnkiConnect instance.
#[derive(Debug, Clone)]
pub struct AnkiConnectClient {
    client: Client,
    url: String,
}

impl Default for AnkiConnectClient {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

impl AnkiConnectClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Names of every deck in the collection.
    pub async fn deck_names(&self) -> Result<Vec<String>, AnkiError> {
        self.invoke_required::<(), _>("deckNames", None).await
    }

    /// Add a single note, returning its id.
    pub async fn add_note(&self, note: &Note) -> Result<i64, AnkiError> {
        let note = ApiNote::from(note);
        self.invoke_required("addNote", Some(NoteParams { note: &note }))
            .await
    }

    /// Add notes in bulk. A `None` id marks a note Anki refused.
    pub async fn add_notes(&self, notes: &[Note]) -> Result<Vec<Option<i64>>, AnkiError> {
        let notes: Vec<ApiNote> = notes.iter().map(ApiNote::from).collect();
        self.invoke_required("addNotes", Some(NotesParams { notes: &notes }))
            .await
    }

    /// Ask Anki whether each note could be added, with a reason when not.
    pub async fn can_add_notes_with_error_detail(
        &self,
        notes: &[Note],
    ) -> Result<Vec<CanAddResult>, AnkiError> {
        let notes: Vec<ApiNote> = notes.iter().map(ApiNote::from).collect();
        self.invoke_required(
            "canAddNotesWithErrorDetail",
            Some(NotesParams { notes: &notes }),
        )
        .await
    }

    /// Ids of the notes matching an Anki search query.
    pub async fn find_notes(&self, query: &str) -> Result<Vec<i64>, AnkiError> {
        self.invoke_required("findNotes", Some(QueryParams { query }))
            .await
    }

    /// Replace the fields of an existing note.
    pub async fn update_note(&self, id: i64, note: &Note) -> Result<(), AnkiError> {
        let fields = NoteFields::from(note);
        // AnkiConnect answers updateNote with a null result.
        self.invoke::<_, serde_json::Value>(
            "updateNote",
            Some(UpdateParams {
                note: NoteUpdate {
                    id,
                    fields: &fields,
                },
            }),
        )
        .await?;
        Ok(())
    }

    async fn invoke_required<P, R>(&self, action: &str, params: Option<P>) -> Result<R, AnkiError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        self.invoke(action, params)
            .await?
            .ok_or_else(|| AnkiError::MissingResult {
                action: action.to_string(),
            })
    }

    async fn invoke<P, R>(&self, action: &str, params: Option<P>) -> Result<Option<R>, AnkiError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = Request {
            action,
            version: API_VERSION,
            params,
        };

        tracing::debug!(action, url = %self.url, "AnkiConnect request");

        let resp = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnkiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(AnkiError::Http { status, message });
        }

        let response: Response<R> = resp
            .json()
            .await
            .map_err(|e| AnkiError::Parse(e.to_string()))?;

        if let Some(message) = response.error {
            return Err(AnkiError::Api {
                action: action.to_string(),
                message,
            });
        }

        Ok(response.result)
    }
}
