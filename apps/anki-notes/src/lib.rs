//! Sends notes embedded in documents to Anki through AnkiConnect.

pub mod anki;
pub mod cli;
pub mod settings;
pub mod sync;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::settings::Settings;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.settings.as_deref())?;
    tracing::debug!(url = %settings.anki_connect_url(), "Loaded settings");

    match cli.command {
        Command::Check { json, files } => cli::check(&settings, &files, json),
        Command::Sync { files } => cli::sync(&settings, &files).await,
        Command::Decks => cli::decks(&settings).await,
    }
}
