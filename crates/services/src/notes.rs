//! Note validation and CRUD orchestration.

use std::sync::Arc;

use domains::{AppError, Note, NoteRepo, Result};

/// Hard cap on note length, counted in characters after trimming.
pub const MAX_CONTENT_CHARS: usize = 500;

/// How many notes the public listing returns.
pub const PUBLIC_LIST_LIMIT: i64 = 200;

/// Coordinates validation and persistence for notes.
#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepo>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepo>) -> Self {
        Self { repo }
    }

    /// Validates and stores a new note.
    ///
    /// Content is trimmed and must be non-empty and at most
    /// [`MAX_CONTENT_CHARS`] characters; the author is trimmed and an empty
    /// result is treated as anonymous.
    pub async fn publish(&self, content: &str, author: Option<&str>) -> Result<Note> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("Content is required".to_string()));
        }
        if content.chars().count() > MAX_CONTENT_CHARS {
            return Err(AppError::Validation(format!(
                "Note is too long (max {MAX_CONTENT_CHARS} chars)"
            )));
        }

        let author = author.unwrap_or("").trim();
        self.repo.create(content, author).await
    }

    /// The latest notes for the public feed, newest first.
    pub async fn latest(&self) -> Result<Vec<Note>> {
        self.repo.list(PUBLIC_LIST_LIMIT).await
    }

    /// Every stored note, for the admin view.
    pub async fn everything(&self) -> Result<Vec<Note>> {
        self.repo.list(i64::MAX).await
    }

    /// Removes one note. Idempotent: unknown ids succeed.
    pub async fn remove(&self, id: i64) -> Result<()> {
        self.repo.delete_by_id(id).await
    }

    /// Empties the store.
    pub async fn clear(&self) -> Result<()> {
        self.repo.delete_all().await
    }
}
