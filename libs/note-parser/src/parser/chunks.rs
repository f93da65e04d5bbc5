//! Slicing a document into candidate note chunks.

/// Split `text` into chunks bounded by `begin` and `end` lines.
///
/// Each chunk holds its begin line and the lines after it, joined with `\n`;
/// the end line is not included. A begin line inside an open chunk discards
/// that chunk and opens a new one. Chunks never closed are dropped silently.
pub fn extract_chunks(text: &str, begin: &str, end: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in text.lines() {
        if line == begin {
            current = Some(vec![line]);
            continue;
        }

        if line == end {
            if let Some(lines) = current.take() {
                chunks.push(lines.join("\n"));
            }
            continue;
        }

        if let Some(ref mut lines) = current {
            lines.push(line);
        }
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BEGIN: &str = "## Anki";
    const END: &str = "Anki End";

    #[test]
    fn empty_document_has_no_chunks() {
        assert!(extract_chunks("", BEGIN, END).is_empty());
    }

    #[test]
    fn chunk_keeps_begin_line_but_not_end_line() {
        let text = "intro\n## Anki\nFront: F\nBack: B\nAnki End\noutro";
        assert_eq!(
            extract_chunks(text, BEGIN, END),
            vec!["## Anki\nFront: F\nBack: B".to_string()]
        );
    }

    #[test]
    fn reopened_chunk_discards_the_first() {
        let text = "## Anki\nFront: lost\n## Anki\nFront: kept\nAnki End";
        assert_eq!(
            extract_chunks(text, BEGIN, END),
            vec!["## Anki\nFront: kept".to_string()]
        );
    }

    #[test]
    fn unterminated_chunk_is_dropped() {
        let text = "## Anki\nFront: F\nBack: B\nAnki End\n## Anki\nFront: never closed";
        assert_eq!(extract_chunks(text, BEGIN, END).len(), 1);
    }

    #[test]
    fn stray_end_marker_is_ignored() {
        let text = "Anki End\nsome text\n## Anki\nFront: F\nAnki End\nAnki End";
        assert_eq!(
            extract_chunks(text, BEGIN, END),
            vec!["## Anki\nFront: F".to_string()]
        );
    }

    #[test]
    fn markers_must_match_whole_line() {
        let text = "## Anki notes\nFront: F\nAnki End";
        assert!(extract_chunks(text, BEGIN, END).is_empty());
    }

    #[test]
    fn crlf_lines_match_markers() {
        let text = "## Anki\r\nFront: F\r\nAnki End\r\n";
        assert_eq!(
            extract_chunks(text, BEGIN, END),
            vec!["## Anki\nFront: F".to_string()]
        );
    }
}
