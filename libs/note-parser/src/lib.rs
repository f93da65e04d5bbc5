//! Note extraction for flashcard documents.
//!
//! Provides:
//! - Chunk extraction between configurable begin/end markers
//! - Basic (front/back) and Cloze note parsing
//! - Cloze deletion rewriting into `{{cN::...}}` numbering
//! - Parser diagnostics (warnings, errors, fatal errors)

pub mod error;
pub mod parser;
pub mod types;

pub use error::{ParseError, Result};
pub use parser::{
    convert_cloze_deletions, extract_chunks, extract_notes, parse_basic, parse_chunk, parse_cloze,
    prescan, ChunkOutcome, Prescan,
};
pub use types::{
    BasicNote, ClozeNote, ErrorKind, Extraction, Note, NoteType, ParserConfig, ParserError,
};
