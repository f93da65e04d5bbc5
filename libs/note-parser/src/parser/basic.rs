//! Basic (front/back) notes.

use super::fields::{extract_fields, FRONT_MISSING};
use super::ChunkOutcome;
use crate::types::{BasicNote, Note, ParserConfig, ParserError};

pub(crate) const BACK_MISSING: &str = "The back of the card is missing.";

/// Parse a Basic note from a chunk's lines.
///
/// The note is returned even when fatal errors were recorded; the caller
/// decides whether to keep it.
pub fn parse_basic(lines: &[&str], config: &ParserConfig, deck: &str) -> ChunkOutcome {
    let fields = extract_fields(lines, config);
    let mut errors = fields.errors;

    if fields.front.is_empty() {
        errors.push(ParserError::fatal(FRONT_MISSING));
    }
    if fields.back.is_empty() {
        errors.push(ParserError::fatal(BACK_MISSING));
    }

    ChunkOutcome {
        note: Note::Basic(BasicNote {
            front: fields.front,
            back: fields.back,
            deck: deck.to_string(),
        }),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(lines: &[&str]) -> ChunkOutcome {
        parse_basic(lines, &ParserConfig::default(), "Default")
    }

    #[test]
    fn parse_inline_note() {
        let outcome = parse(&["## Anki", "Front: What is Rust?", "Back: A language."]);
        assert_eq!(
            outcome.note,
            Note::Basic(BasicNote {
                front: "What is Rust?".to_string(),
                back: "A language.".to_string(),
                deck: "Default".to_string(),
            })
        );
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn missing_back_is_fatal() {
        let outcome = parse(&["## Anki", "Front: Question only"]);
        assert_eq!(outcome.errors, vec![ParserError::fatal(BACK_MISSING)]);
        assert!(outcome.is_fatal());
    }

    #[test]
    fn missing_front_and_back_are_both_reported() {
        let outcome = parse(&["## Anki"]);
        assert_eq!(
            outcome.errors,
            vec![
                ParserError::fatal(FRONT_MISSING),
                ParserError::fatal(BACK_MISSING),
            ]
        );
    }

    #[test]
    fn whitespace_only_front_is_missing() {
        let outcome = parse(&["Front:", "   ", "", "Back: B"]);
        assert_eq!(outcome.errors, vec![ParserError::fatal(FRONT_MISSING)]);
    }
}
