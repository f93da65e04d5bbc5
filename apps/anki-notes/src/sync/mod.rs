//! Sync engine: sends the notes of a document to Anki.
//!
//! Existing notes (matched by deck and first field) are updated in place;
//! new notes are validated with Anki first and then added in bulk.

use std::sync::Arc;

use note_parser::{extract_notes, Note, ParseError, ParserConfig, ParserError};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::anki::{find_query, AnkiConnectClient, AnkiError};

/// Sync errors.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Could not connect to AnkiConnect: {0}")]
    Connection(AnkiError),

    #[error(transparent)]
    Anki(#[from] AnkiError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("AnkiConnect {action} answered for {actual} of {expected} notes")]
    AnswerCountMismatch {
        action: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Sync already in progress")]
    AlreadyInProgress,
}

/// Sync status for callers polling the engine.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum SyncStatus {
    Idle,
    Syncing { stage: SyncStage },
    Completed { report: SyncReport },
    Failed { error: String },
}

/// Current sync stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "name")]
pub enum SyncStage {
    Connecting,
    Parsing,
    Updating,
    Validating,
    Adding,
}

/// A note Anki would not accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedNote {
    pub deck: String,
    pub front: String,
    pub reason: String,
}

/// Outcome of syncing one document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    pub rejected: Vec<RejectedNote>,
    /// Decks named by notes but absent from the collection.
    pub missing_decks: Vec<String>,
    pub parser_errors: Vec<ParserError>,
}

struct SyncEngineInner {
    client: AnkiConnectClient,
    config: ParserConfig,
    status: Mutex<SyncStatus>,
}

/// Sync engine for one AnkiConnect endpoint.
///
/// Clone-able; clones share the same status.
#[derive(Clone)]
pub struct SyncEngine {
    inner: Arc<SyncEngineInner>,
}

impl SyncEngine {
    pub fn new(client: AnkiConnectClient, config: ParserConfig) -> Self {
        Self {
            inner: Arc::new(SyncEngineInner {
                client,
                config,
                status: Mutex::new(SyncStatus::Idle),
            }),
        }
    }

    /// Get current sync status.
    pub async fn status(&self) -> SyncStatus {
        self.inner.status.lock().await.clone()
    }

    /// Parse `text` and push its notes to Anki.
    pub async fn sync_document(&self, text: &str) -> Result<SyncReport, SyncError> {
        {
            let mut current = self.inner.status.lock().await;
            if matches!(*current, SyncStatus::Syncing { .. }) {
                return Err(SyncError::AlreadyInProgress);
            }
            *current = SyncStatus::Syncing {
                stage: SyncStage::Connecting,
            };
        }

        match self.run(text).await {
            Ok(report) => {
                tracing::info!(
                    created = report.created,
                    updated = report.updated,
                    rejected = report.rejected.len(),
                    "Sync complete"
                );
                self.set_status(SyncStatus::Completed {
                    report: report.clone(),
                })
                .await;
                Ok(report)
            }
            Err(e) => {
                self.set_status(SyncStatus::Failed {
                    error: e.to_string(),
                })
                .await;
                Err(e)
            }
        }
    }

    async fn run(&self, text: &str) -> Result<SyncReport, SyncError> {
        let client = &self.inner.client;
        let mut report = SyncReport::default();

        // 1. Connect
        let decks = client.deck_names().await.map_err(SyncError::Connection)?;
        tracing::info!(url = client.url(), decks = decks.len(), "Connected to AnkiConnect");

        // 2. Parse
        self.set_stage(SyncStage::Parsing).await;
        let extraction = extract_notes(text, &self.inner.config)?;
        for error in &extraction.errors {
            tracing::warn!(fatal = error.fatal, "{}", error);
        }
        tracing::info!(
            notes = extraction.notes.len(),
            diagnostics = extraction.errors.len(),
            "Parsed notes"
        );
        report.parser_errors = extraction.errors;

        for note in &extraction.notes {
            let deck = note.deck();
            let known = decks.iter().chain(&report.missing_decks).any(|d| d == deck);
            if !known {
                tracing::warn!(deck, "Deck does not exist in Anki");
                report.missing_decks.push(deck.to_string());
            }
        }

        // 3. Update notes that already exist
        self.set_stage(SyncStage::Updating).await;
        let mut new_notes = Vec::new();
        for note in extraction.notes {
            let ids = client.find_notes(&find_query(&note)).await?;
            match ids.first() {
                Some(&id) => {
                    client.update_note(id, &note).await?;
                    tracing::debug!(id, "Updated note");
                    report.updated += 1;
                }
                None => new_notes.push(note),
            }
        }

        if new_notes.is_empty() {
            return Ok(report);
        }

        // 4. Validate new notes
        self.set_stage(SyncStage::Validating).await;
        let checks = client.can_add_notes_with_error_detail(&new_notes).await?;
        expect_answers("canAddNotesWithErrorDetail", new_notes.len(), checks.len())?;
        let mut addable: Vec<Note> = Vec::new();
        for (note, check) in new_notes.into_iter().zip(checks) {
            if check.can_add {
                addable.push(note);
            } else {
                let reason = check.error.unwrap_or_else(|| "cannot add note".to_string());
                report.rejected.push(rejected(&note, reason));
            }
        }

        if addable.is_empty() {
            return Ok(report);
        }

        // 5. Add
        self.set_stage(SyncStage::Adding).await;
        let ids = client.add_notes(&addable).await?;
        expect_answers("addNotes", addable.len(), ids.len())?;
        for (note, id) in addable.iter().zip(ids) {
            match id {
                Some(_) => report.created += 1,
                None => report
                    .rejected
                    .push(rejected(note, "AnkiConnect did not add the note".to_string())),
            }
        }

        Ok(report)
    }

    async fn set_stage(&self, stage: SyncStage) {
        tracing::debug!(?stage, "Sync stage");
        self.set_status(SyncStatus::Syncing { stage }).await;
    }

    async fn set_status(&self, status: SyncStatus) {
        *self.inner.status.lock().await = status;
    }
}

fn expect_answers(action: &'static str, expected: usize, actual: usize) -> Result<(), SyncError> {
    if expected != actual {
        return Err(SyncError::AnswerCountMismatch {
            action,
            expected,
            actual,
        });
    }
    Ok(())
}

fn rejected(note: &Note, reason: String) -> RejectedNote {
    RejectedNote {
        deck: note.deck().to_string(),
        front: note.front().to_string(),
        reason,
    }
}
