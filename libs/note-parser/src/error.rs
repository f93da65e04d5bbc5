//! Error types for note-parser.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Invariant violations raised by the parser.
///
/// Problems in the user's document are reported as
/// [`ParserError`](crate::types::ParserError) diagnostics, not through this type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("the chunk is empty")]
    EmptyChunk,
}
