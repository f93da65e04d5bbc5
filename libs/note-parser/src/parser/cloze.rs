//! Cloze notes and the `{{...}}` deletion rewrite.
//!
//! Deletions are written as `{{content}}` or `{{id|content}}` and become
//! `{{cN::content}}`. Deletions without an id are numbered from 1 in order
//! of appearance; explicit ids pass through verbatim and do not advance the
//! numbering.

use std::sync::OnceLock;

use regex::Regex;

use super::fields::{extract_fields, FRONT_MISSING};
use super::ChunkOutcome;
use crate::types::{ClozeNote, Note, ParserConfig, ParserError};

pub(crate) const DELETIONS_MISSING: &str = "The front of the card is missing Cloze deletions.";

fn deletion_pattern() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"\{\{(.*?)\}\}").unwrap_or_else(|e| panic!("invalid cloze pattern: {}", e))
    })
}

/// Rewrite every `{{...}}` span in `text` into numbered cloze deletions.
///
/// Returns `None` when `text` has no span. Spans are replaced by text, so a
/// span repeated verbatim takes the replacement computed for its first
/// occurrence everywhere, while each occurrence still advances the numbering.
/// Later spans also match text written by earlier replacements.
pub fn convert_cloze_deletions(text: &str) -> Option<String> {
    let spans: Vec<&str> = deletion_pattern()
        .find_iter(text)
        .map(|m| m.as_str())
        .collect();
    if spans.is_empty() {
        return None;
    }

    let mut converted = text.to_string();
    let mut next_index = 1usize;

    for span in spans {
        let inner = &span[2..span.len() - 2];
        let replacement = match inner.split_once('|') {
            Some((id, content)) => format!("{{{{c{}::{}}}}}", id, content),
            None => {
                let replacement = format!("{{{{c{}::{}}}}}", next_index, inner);
                next_index += 1;
                replacement
            }
        };
        converted = converted.replace(span, &replacement);
    }

    Some(converted)
}

/// Parse a Cloze note from a chunk's lines.
///
/// The back is optional. A front without deletions is fatal, but the note is
/// still returned with its front untouched.
pub fn parse_cloze(lines: &[&str], config: &ParserConfig, deck: &str) -> ChunkOutcome {
    let fields = extract_fields(lines, config);
    let mut errors = fields.errors;

    let front = match convert_cloze_deletions(&fields.front) {
        Some(converted) => converted,
        None => {
            errors.push(ParserError::fatal(DELETIONS_MISSING));
            fields.front
        }
    };

    if front.is_empty() {
        errors.push(ParserError::fatal(FRONT_MISSING));
    }

    let back = if fields.back.is_empty() {
        None
    } else {
        Some(fields.back)
    };

    ChunkOutcome {
        note: Note::Cloze(ClozeNote {
            front,
            back,
            deck: deck.to_string(),
        }),
        errors,
    }
}
