//! # purge
//!
//! Empties the note store and exits. Meant to run from cron for
//! deployments that wipe the wall on a schedule.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use configs::{AppConfig, NotesBackend};
use domains::NoteRepo;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "db-sqlite")]
use storage_adapters::SqliteNoteRepo;

#[cfg(feature = "store-file")]
use storage_adapters::JsonFileNoteRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let repo: Arc<dyn NoteRepo> = match config.notes_backend {
        #[cfg(feature = "db-sqlite")]
        NotesBackend::Sqlite => {
            Arc::new(SqliteNoteRepo::open(Path::new(&config.database_path)).await?)
        }
        #[cfg(feature = "store-file")]
        NotesBackend::File => Arc::new(JsonFileNoteRepo::new(config.notes_file.clone().into())),
        #[allow(unreachable_patterns)]
        other => anyhow::bail!("note backend {other:?} is not compiled into this binary"),
    };

    repo.delete_all().await.context("failed to purge notes")?;
    info!("all notes deleted");
    Ok(())
}
