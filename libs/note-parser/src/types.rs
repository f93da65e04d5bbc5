//! Core types for note extraction.

use serde::{Deserialize, Serialize};

/// Marker strings that drive the parser.
///
/// Every marker is matched against whole lines: chunk markers must equal the
/// line, field markers must start it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserConfig {
    pub chunk_begin_marker: String,
    pub chunk_end_marker: String,
    pub type_marker: String,
    pub deck_marker: String,
    pub front_marker: String,
    pub back_marker: String,
    pub default_deck: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            chunk_begin_marker: "## Anki".to_string(),
            chunk_end_marker: "Anki End".to_string(),
            type_marker: "Card Type:".to_string(),
            deck_marker: "Deck:".to_string(),
            front_marker: "Front:".to_string(),
            back_marker: "Back:".to_string(),
            default_deck: String::new(),
        }
    }
}

/// Note type as named by the flashcard application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteType {
    #[serde(rename = "Basic")]
    Basic,
    #[serde(rename = "Cloze")]
    Cloze,
    #[serde(rename = "Basic (and reversed card)")]
    BasicAndReversed,
    #[serde(rename = "Basic (type in the answer)")]
    BasicTypeIn,
}

impl Default for NoteType {
    fn default() -> Self {
        Self::Basic
    }
}

impl NoteType {
    /// Get the note type name, which doubles as the remote model name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Cloze => "Cloze",
            Self::BasicAndReversed => "Basic (and reversed card)",
            Self::BasicTypeIn => "Basic (type in the answer)",
        }
    }

    /// Parse from the exact type name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Basic" => Some(Self::Basic),
            "Cloze" => Some(Self::Cloze),
            "Basic (and reversed card)" => Some(Self::BasicAndReversed),
            "Basic (type in the answer)" => Some(Self::BasicTypeIn),
            _ => None,
        }
    }
}

/// A front/back note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicNote {
    pub front: String,
    pub back: String,
    pub deck: String,
}

/// A cloze note. The front carries the rewritten `{{cN::...}}` deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClozeNote {
    pub front: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
    pub deck: String,
}

/// A note extracted from one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Note {
    Basic(BasicNote),
    Cloze(ClozeNote),
}

impl Note {
    pub fn note_type(&self) -> NoteType {
        match self {
            Self::Basic(_) => NoteType::Basic,
            Self::Cloze(_) => NoteType::Cloze,
        }
    }

    pub fn front(&self) -> &str {
        match self {
            Self::Basic(note) => &note.front,
            Self::Cloze(note) => &note.front,
        }
    }

    /// The back of the note. Cloze notes may have none.
    pub fn back(&self) -> Option<&str> {
        match self {
            Self::Basic(note) => Some(&note.back),
            Self::Cloze(note) => note.back.as_deref(),
        }
    }

    pub fn deck(&self) -> &str {
        match self {
            Self::Basic(note) => &note.deck,
            Self::Cloze(note) => &note.deck,
        }
    }
}

/// Severity of a parser diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Warning,
    Error,
}

/// A diagnostic raised while parsing a chunk.
///
/// A fatal diagnostic means the chunk's note is dropped from the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default)]
    pub fatal: bool,
}

impl ParserError {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Warning,
            message: message.into(),
            fatal: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Error,
            message: message.into(),
            fatal: false,
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Error,
            message: message.into(),
            fatal: true,
        }
    }
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match (self.kind, self.fatal) {
            (ErrorKind::Warning, _) => "warning",
            (ErrorKind::Error, false) => "error",
            (ErrorKind::Error, true) => "fatal",
        };
        write!(f, "{}: {}", label, self.message)
    }
}

/// Notes and diagnostics extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub notes: Vec<Note>,
    pub errors: Vec<ParserError>,
}

impl Extraction {
    pub fn has_fatal_errors(&self) -> bool {
        self.errors.iter().any(|e| e.fatal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_type_names_round_trip() {
        for ty in [
            NoteType::Basic,
            NoteType::Cloze,
            NoteType::BasicAndReversed,
            NoteType::BasicTypeIn,
        ] {
            assert_eq!(NoteType::from_str(ty.as_str()), Some(ty));
        }
        assert_eq!(NoteType::from_str("basic"), None);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: ParserConfig =
            serde_json::from_str(r#"{"defaultDeck": "Geography", "frontMarker": "Q:"}"#).unwrap();
        assert_eq!(config.default_deck, "Geography");
        assert_eq!(config.front_marker, "Q:");
        assert_eq!(config.back_marker, "Back:");
        assert_eq!(config.chunk_begin_marker, "## Anki");
    }

    #[test]
    fn cloze_back_accessor_is_optional() {
        let note = Note::Cloze(ClozeNote {
            front: "{{c1::Paris}}".to_string(),
            back: None,
            deck: "Default".to_string(),
        });
        assert_eq!(note.back(), None);
        assert_eq!(note.note_type(), NoteType::Cloze);
    }

    #[test]
    fn display_labels_fatal_errors() {
        assert_eq!(
            ParserError::fatal("The front of the card is missing.").to_string(),
            "fatal: The front of the card is missing."
        );
        assert_eq!(ParserError::warning("w").to_string(), "warning: w");
    }
}
