//! Flat-file JSON implementation of `NoteRepo`.
//!
//! Notes live in a single JSON array on disk. Writes go through a temp file
//! and a rename so a crash never leaves a half-written store behind, and a
//! mutex serializes read-modify-write cycles within the process.

use async_trait::async_trait;
use chrono::Utc;
use domains::{AppError, Note, NoteRepo, Result};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

pub struct JsonFileNoteRepo {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileNoteRepo {
    /// The store file is created lazily on the first write.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<Note>> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(AppError::internal),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(AppError::internal(err)),
        }
    }

    async fn save(&self, notes: &[Note]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(AppError::internal)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(notes).map_err(AppError::internal)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &bytes).await.map_err(AppError::internal)?;
        fs::rename(&tmp, &self.path).await.map_err(AppError::internal)?;
        Ok(())
    }
}

#[async_trait]
impl NoteRepo for JsonFileNoteRepo {
    async fn list(&self, limit: i64) -> Result<Vec<Note>> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.load().await?;
        notes.sort_by_key(|note| std::cmp::Reverse(note.id));
        notes.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(notes)
    }

    async fn create(&self, content: &str, author: &str) -> Result<Note> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.load().await?;

        let id = notes.iter().map(|note| note.id).max().unwrap_or(0) + 1;
        let note = Note {
            id,
            content: content.to_string(),
            author: (!author.is_empty()).then(|| author.to_string()),
            created_at: Utc::now(),
        };

        notes.push(note.clone());
        self.save(&notes).await?;
        Ok(note)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.load().await?;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() != before {
            self.save(&notes).await?;
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        debug!(path = %self.path.display(), "clearing note file");
        self.save(&[]).await
    }
}
