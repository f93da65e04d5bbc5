//! AnkiConnect note representation.

use note_parser::Note;
use serde::Serialize;

/// Tag attached to every note sent to Anki.
pub const NOTE_TAG: &str = "Obsidian";

/// A note in the shape `addNote`/`addNotes` expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNote {
    pub deck_name: String,
    pub model_name: String,
    pub options: NoteOptions,
    pub tags: Vec<String>,
    pub fields: NoteFields,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteOptions {
    pub allow_duplicate: bool,
    pub duplicate_scope: String,
}

impl Default for NoteOptions {
    fn default() -> Self {
        Self {
            allow_duplicate: false,
            duplicate_scope: "deck".to_string(),
        }
    }
}

/// Model fields, named after the Basic and Cloze models' field names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NoteFields {
    Basic {
        #[serde(rename = "Front")]
        front: String,
        #[serde(rename = "Back")]
        back: String,
    },
    Cloze {
        #[serde(rename = "Text")]
        text: String,
        #[serde(rename = "Back Extra", skip_serializing_if = "Option::is_none")]
        back_extra: Option<String>,
    },
}

impl From<&Note> for NoteFields {
    fn from(note: &Note) -> Self {
        match note {
            Note::Basic(basic) => Self::Basic {
                front: basic.front.clone(),
                back: basic.back.clone(),
            },
            Note::Cloze(cloze) => Self::Cloze {
                text: cloze.front.clone(),
                back_extra: cloze.back.clone(),
            },
        }
    }
}

impl From<&Note> for ApiNote {
    fn from(note: &Note) -> Self {
        Self {
            deck_name: note.deck().to_string(),
            model_name: note.note_type().as_str().to_string(),
            options: NoteOptions::default(),
            tags: vec![NOTE_TAG.to_string()],
            fields: NoteFields::from(note),
        }
    }
}

/// Search query matching an existing note by deck and first field.
pub fn find_query(note: &Note) -> String {
    match note {
        Note::Basic(basic) => format!("\"deck:{}\" \"front:{}\"", basic.deck, basic.front),
        Note::Cloze(cloze) => format!("\"deck:{}\" \"text:{}\"", cloze.deck, cloze.front),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use note_parser::{BasicNote, ClozeNote};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn basic() -> Note {
        Note::Basic(BasicNote {
            front: "What is the capital of France?".to_string(),
            back: "Paris".to_string(),
            deck: "Geography".to_string(),
        })
    }

    fn cloze(back: Option<&str>) -> Note {
        Note::Cloze(ClozeNote {
            front: "The capital of France is {{c1::Paris}}.".to_string(),
            back: back.map(str::to_string),
            deck: "Geography".to_string(),
        })
    }

    #[test]
    fn basic_note_wire_format() {
        let value = serde_json::to_value(ApiNote::from(&basic())).unwrap();
        assert_eq!(
            value,
            json!({
                "deckName": "Geography",
                "modelName": "Basic",
                "options": { "allowDuplicate": false, "duplicateScope": "deck" },
                "tags": ["Obsidian"],
                "fields": { "Front": "What is the capital of France?", "Back": "Paris" }
            })
        );
    }

    #[test]
    fn cloze_note_wire_format() {
        let value = serde_json::to_value(ApiNote::from(&cloze(Some("Extra")))).unwrap();
        assert_eq!(value["modelName"], "Cloze");
        assert_eq!(
            value["fields"],
            json!({ "Text": "The capital of France is {{c1::Paris}}.", "Back Extra": "Extra" })
        );
    }

    #[test]
    fn cloze_without_back_omits_back_extra() {
        let value = serde_json::to_value(ApiNote::from(&cloze(None))).unwrap();
        assert_eq!(
            value["fields"],
            json!({ "Text": "The capital of France is {{c1::Paris}}." })
        );
    }

    #[test]
    fn key_order_matches_addnote_payload() {
        let text = serde_json::to_string(&ApiNote::from(&basic())).unwrap();
        let deck = text.find("deckName").unwrap();
        let model = text.find("modelName").unwrap();
        let fields = text.find("fields").unwrap();
        assert!(deck < model && model < fields);
    }

    #[test]
    fn find_queries() {
        assert_eq!(
            find_query(&basic()),
            r#""deck:Geography" "front:What is the capital of France?""#
        );
        assert_eq!(
            find_query(&cloze(None)),
            r#""deck:Geography" "text:The capital of France is {{c1::Paris}}.""#
        );
    }
}
