//! First pass over a chunk: note type and deck.

use crate::types::{NoteType, ParserConfig, ParserError};

pub(crate) const TYPE_OVERWRITTEN: &str =
    "The type of the card is being overwritten. (it has been likely defined twice.)";
pub(crate) const TYPE_INVALID: &str =
    "The type of the card is invalid. Returning to the last type defined.";

/// Note type and deck resolved for one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prescan {
    pub note_type: NoteType,
    pub deck: String,
    pub errors: Vec<ParserError>,
}

/// Resolve the type and deck declared in `lines`.
///
/// The last valid type line wins, with a warning for each redeclaration.
/// Invalid type names keep the previous type. The last deck line wins silently.
pub fn prescan(lines: &[&str], config: &ParserConfig) -> Prescan {
    let mut note_type = NoteType::default();
    let mut type_declared = false;
    let mut deck = config.default_deck.clone();
    let mut errors = Vec::new();

    for line in lines {
        if let Some(rest) = line.strip_prefix(config.type_marker.as_str()) {
            if type_declared {
                errors.push(ParserError::warning(TYPE_OVERWRITTEN));
            }

            match NoteType::from_str(rest.trim()) {
                Some(ty) => {
                    note_type = ty;
                    type_declared = true;
                }
                None => errors.push(ParserError::error(TYPE_INVALID)),
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix(config.deck_marker.as_str()) {
            deck = rest.trim().to_string();
        }
    }

    Prescan {
        note_type,
        deck,
        errors,
    }
}
