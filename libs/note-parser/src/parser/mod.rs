//! Note parser for flashcard documents.
//!
//! # Format
//! ```markdown
//! ## Anki
//! Card Type: Basic
//! Deck: Geography
//! Front: What is the capital of France?
//! Back: Paris
//! Anki End
//!
//! ## Anki
//! Card Type: Cloze
//! Front:
//! The capital of France is {{Paris}}.
//! The capital of Germany is {{2|Berlin}}.
//! Anki End
//! ```
//!
//! All markers are configurable through [`ParserConfig`].

mod basic;
mod chunks;
mod cloze;
mod fields;
mod prescan;

pub use basic::parse_basic;
pub use chunks::extract_chunks;
pub use cloze::{convert_cloze_deletions, parse_cloze};
pub use prescan::{prescan, Prescan};

use crate::error::{ParseError, Result};
use crate::types::{Extraction, Note, NoteType, ParserConfig, ParserError};

/// The note parsed from one chunk together with every diagnostic it raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkOutcome {
    pub note: Note,
    pub errors: Vec<ParserError>,
}

impl ChunkOutcome {
    /// Whether the note must be dropped.
    pub fn is_fatal(&self) -> bool {
        self.errors.iter().any(|e| e.fatal)
    }
}

/// Extract every note from `text`.
///
/// Notes from chunks with fatal errors are dropped, but all diagnostics of
/// every chunk are returned in document order.
pub fn extract_notes(text: &str, config: &ParserConfig) -> Result<Extraction> {
    let mut extraction = Extraction::default();

    for chunk in extract_chunks(text, &config.chunk_begin_marker, &config.chunk_end_marker) {
        let outcome = parse_chunk(&chunk, config)?;
        let fatal = outcome.is_fatal();

        extraction.errors.extend(outcome.errors);
        if !fatal {
            extraction.notes.push(outcome.note);
        }
    }

    Ok(extraction)
}

/// Parse a single chunk into a note.
///
/// The type and deck are resolved first; Cloze chunks go to the cloze parser
/// and every other type is parsed as Basic.
pub fn parse_chunk(chunk: &str, config: &ParserConfig) -> Result<ChunkOutcome> {
    let lines: Vec<&str> = chunk.lines().collect();
    if lines.is_empty() {
        return Err(ParseError::EmptyChunk);
    }

    let scan = prescan(&lines, config);

    let parsed = match scan.note_type {
        NoteType::Cloze => parse_cloze(&lines, config, &scan.deck),
        NoteType::Basic | NoteType::BasicAndReversed | NoteType::BasicTypeIn => {
            parse_basic(&lines, config, &scan.deck)
        }
    };

    let mut errors = scan.errors;
    errors.extend(parsed.errors);

    Ok(ChunkOutcome {
        note: parsed.note,
        errors,
    })
}
