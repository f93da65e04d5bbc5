//! Front/back field extraction shared by every note type.

use crate::types::{ParserConfig, ParserError};

pub(crate) const FRONT_OVERWRITTEN: &str =
    "The front of the card is being overwritten. (it has been likely defined twice)";
pub(crate) const BACK_OVERWRITTEN: &str =
    "The back of the card is being overwritten. (it has been likely defined twice)";
pub(crate) const FRONT_MISSING: &str = "The front of the card is missing.";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Front,
    Back,
}

/// Trimmed front and back text of a chunk plus overwrite warnings.
#[derive(Debug, Default)]
pub(crate) struct Fields {
    pub front: String,
    pub back: String,
    pub errors: Vec<ParserError>,
}

struct FieldParser<'a> {
    config: &'a ParserConfig,
    front: String,
    back: String,
    current_field: Option<Field>,
    errors: Vec<ParserError>,
}

impl<'a> FieldParser<'a> {
    fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            front: String::new(),
            back: String::new(),
            current_field: None,
            errors: Vec::new(),
        }
    }

    fn process_line(&mut self, line: &str) {
        match self.parse_line(line) {
            LineType::Skip => {}
            LineType::Inline(field, text) => self.handle_inline(field, text),
            LineType::Opener(field) => self.handle_opener(field),
            LineType::Text(text) => self.handle_text(text),
        }
    }

    fn parse_line<'l>(&self, line: &'l str) -> LineType<'l> {
        let config = self.config;

        if line.starts_with(config.type_marker.as_str())
            || line.starts_with(config.deck_marker.as_str())
        {
            return LineType::Skip;
        }

        for (field, marker) in [
            (Field::Front, config.front_marker.as_str()),
            (Field::Back, config.back_marker.as_str()),
        ] {
            if let Some(rest) = line.strip_prefix(marker) {
                if line.trim().len() > marker.trim().len() {
                    return LineType::Inline(field, rest);
                }
            }
            if line == marker {
                return LineType::Opener(field);
            }
        }

        LineType::Text(line)
    }

    fn handle_inline(&mut self, field: Field, text: &str) {
        let (slot, warning) = match field {
            Field::Front => (&mut self.front, FRONT_OVERWRITTEN),
            Field::Back => (&mut self.back, BACK_OVERWRITTEN),
        };
        if !slot.is_empty() {
            self.errors.push(ParserError::warning(warning));
        }
        *slot = text.to_string();
    }

    fn handle_opener(&mut self, field: Field) {
        match field {
            Field::Front => self.front.clear(),
            Field::Back => self.back.clear(),
        }
        self.current_field = Some(field);
    }

    fn handle_text(&mut self, text: &str) {
        let slot = match self.current_field {
            Some(Field::Front) => &mut self.front,
            Some(Field::Back) => &mut self.back,
            None => return,
        };
        slot.push_str(text);
        slot.push('\n');
    }

    fn finalize(self) -> Fields {
        Fields {
            front: self.front.trim().to_string(),
            back: self.back.trim().to_string(),
            errors: self.errors,
        }
    }
}

enum LineType<'a> {
    Skip,
    Inline(Field, &'a str),
    Opener(Field),
    Text(&'a str),
}

/// Run the field state machine over a chunk's lines.
pub(crate) fn extract_fields(lines: &[&str], config: &ParserConfig) -> Fields {
    let mut parser = FieldParser::new(config);
    for line in lines {
        parser.process_line(line);
    }
    parser.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(lines: &[&str]) -> Fields {
        extract_fields(lines, &ParserConfig::default())
    }

    #[test]
    fn inline_fields_are_trimmed() {
        let result = fields(&["## Anki", "Front:   What is 2x2? ", "Back: 4"]);
        assert_eq!(result.front, "What is 2x2?");
        assert_eq!(result.back, "4");
        assert!(result.errors.is_empty());
    }

    #[test]
    fn multiline_fields_collect_following_lines() {
        let result = fields(&["Front:", "", "Line 1", "Line 2", "", "Back:", "A", "B"]);
        assert_eq!(result.front, "Line 1\nLine 2");
        assert_eq!(result.back, "A\nB");
    }

    #[test]
    fn type_and_deck_lines_are_not_field_content() {
        let result = fields(&["Front:", "Q", "Deck: Somewhere", "Card Type: Basic", "R"]);
        assert_eq!(result.front, "Q\nR");
    }

    #[test]
    fn inline_overwrite_warns() {
        let result = fields(&["Front: one", "Front: two", "Back: a", "Back: b"]);
        assert_eq!(result.front, "two");
        assert_eq!(result.back, "b");
        assert_eq!(
            result.errors,
            vec![
                ParserError::warning(FRONT_OVERWRITTEN),
                ParserError::warning(BACK_OVERWRITTEN),
            ]
        );
    }

    #[test]
    fn inline_field_keeps_multiline_state() {
        let result = fields(&["Back:", "first", "Front: inline", "second"]);
        assert_eq!(result.front, "inline");
        assert_eq!(result.back, "first\nsecond");
    }

    #[test]
    fn multiline_opener_resets_without_warning() {
        let result = fields(&["Front: old", "Front:", "new"]);
        assert_eq!(result.front, "new");
        assert!(result.errors.is_empty());
    }

    #[test]
    fn marker_with_trailing_space_is_not_inline() {
        let result = fields(&["Front: ", "ignored"]);
        assert_eq!(result.front, "");
    }

    #[test]
    fn lines_outside_fields_are_ignored() {
        let result = fields(&["## Anki", "stray", "Front: F"]);
        assert_eq!(result.front, "F");
        assert_eq!(result.back, "");
    }
}
