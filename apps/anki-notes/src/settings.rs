//! Application settings.
//!
//! Defaults, then an optional JSON settings file (partial documents are
//! merged over the defaults), then environment overrides.

use std::path::{Path, PathBuf};

use note_parser::ParserConfig;
use serde::{Deserialize, Serialize};

/// Default AnkiConnect port.
pub const DEFAULT_PORT: &str = "8765";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(flatten)]
    pub parser: ParserConfig,
    pub anki_connect_port: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            anki_connect_port: DEFAULT_PORT.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Read a JSON settings file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `ANKI_CONNECT_PORT` and `ANKI_DEFAULT_DECK` from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("ANKI_CONNECT_PORT") {
            self.anki_connect_port = port;
        }
        if let Some(deck) = lookup("ANKI_DEFAULT_DECK") {
            self.parser.default_deck = deck;
        }
    }

    /// The AnkiConnect endpoint. An empty port falls back to the default.
    pub fn anki_connect_url(&self) -> String {
        let port = self.anki_connect_port.trim();
        let port = if port.is_empty() { DEFAULT_PORT } else { port };
        format!("http://localhost:{}", port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.anki_connect_url(), "http://localhost:8765");
        assert_eq!(settings.parser.chunk_begin_marker, "## Anki");
        assert_eq!(settings.parser.chunk_end_marker, "Anki End");
    }

    #[test]
    fn partial_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"ankiConnectPort": "9000", "defaultDeck": "Inbox", "frontMarker": "Q:"}}"#
        )
        .unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.anki_connect_port, "9000");
        assert_eq!(settings.parser.default_deck, "Inbox");
        assert_eq!(settings.parser.front_marker, "Q:");
        assert_eq!(settings.parser.back_marker, "Back:");
    }

    #[test]
    fn invalid_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            Settings::from_file(file.path()),
            Err(SettingsError::Invalid { .. })
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let result = Settings::from_file(Path::new("/nonexistent/anki-notes.json"));
        assert!(matches!(result, Err(SettingsError::Io { .. })));
    }

    #[test]
    fn environment_overrides() {
        let mut settings = Settings::default();
        settings.apply_overrides(|key| match key {
            "ANKI_CONNECT_PORT" => Some("8800".to_string()),
            "ANKI_DEFAULT_DECK" => Some("Env Deck".to_string()),
            _ => None,
        });
        assert_eq!(settings.anki_connect_url(), "http://localhost:8800");
        assert_eq!(settings.parser.default_deck, "Env Deck");
    }

    #[test]
    fn empty_port_uses_default() {
        let settings = Settings {
            anki_connect_port: String::new(),
            ..Settings::default()
        };
        assert_eq!(settings.anki_connect_url(), "http://localhost:8765");
    }
}
