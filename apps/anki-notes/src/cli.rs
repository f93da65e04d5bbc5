//! Command line interface.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use note_parser::{extract_notes, Extraction};

use crate::anki::AnkiConnectClient;
use crate::settings::Settings;
use crate::sync::{SyncEngine, SyncReport};

#[derive(Debug, Parser)]
#[command(
    name = "anki-notes",
    version,
    about = "Send flashcard notes embedded in documents to Anki."
)]
pub struct Cli {
    /// JSON settings file; missing keys keep their defaults.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse the given documents and report their notes and diagnostics.
    Check {
        /// Print the extraction as JSON.
        #[arg(long)]
        json: bool,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Add or update the notes of the given documents in Anki.
    Sync {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List the decks of the Anki collection.
    Decks,
}

fn read_document(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn check(settings: &Settings, files: &[PathBuf], json: bool) -> anyhow::Result<()> {
    for path in files {
        let text = read_document(path)?;
        let extraction = extract_notes(&text, &settings.parser)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&extraction)?);
        } else {
            print_extraction(path, &extraction);
        }
    }
    Ok(())
}

fn print_extraction(path: &Path, extraction: &Extraction) {
    println!(
        "{}: {} notes, {} diagnostics",
        path.display(),
        extraction.notes.len(),
        extraction.errors.len()
    );
    for note in &extraction.notes {
        let first_line = note.front().lines().next().unwrap_or_default();
        println!("  [{}] {}: {}", note.note_type().as_str(), note.deck(), first_line);
    }
    for error in &extraction.errors {
        println!("  {}", error);
    }
}

pub async fn sync(settings: &Settings, files: &[PathBuf]) -> anyhow::Result<()> {
    let client = AnkiConnectClient::new(settings.anki_connect_url());
    let engine = SyncEngine::new(client, settings.parser.clone());

    for path in files {
        let text = read_document(path)?;
        tracing::info!(file = %path.display(), "Syncing document");
        let report = engine
            .sync_document(&text)
            .await
            .with_context(|| format!("failed to sync {}", path.display()))?;
        print_report(path, &report);
    }
    Ok(())
}

fn print_report(path: &Path, report: &SyncReport) {
    println!(
        "{}: {} created, {} updated, {} rejected, {} diagnostics",
        path.display(),
        report.created,
        report.updated,
        report.rejected.len(),
        report.parser_errors.len()
    );
    for deck in &report.missing_decks {
        println!("  missing deck {}", deck);
    }
    for rejected in &report.rejected {
        println!("  rejected [{}] {}: {}", rejected.deck, rejected.front, rejected.reason);
    }
    for error in &report.parser_errors {
        println!("  {}", error);
    }
}

pub async fn decks(settings: &Settings) -> anyhow::Result<()> {
    let client = AnkiConnectClient::new(settings.anki_connect_url());
    for name in client.deck_names().await? {
        println!("{}", name);
    }
    Ok(())
}
