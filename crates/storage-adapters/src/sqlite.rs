//! SQLite implementation of `NoteRepo`.
//!
//! This module maps between the relational schema and the domain model.
//! Ids come from the `AUTOINCREMENT` column, so they are strictly monotonic
//! even under concurrent writers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::{AppError, Note, NoteRepo, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use tracing::debug;

/// Notes table, created on startup when missing.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS notes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    content     TEXT NOT NULL,
    author      TEXT,
    created_at  TEXT NOT NULL
)";

pub struct SqliteNoteRepo {
    pool: SqlitePool,
}

impl SqliteNoteRepo {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(AppError::internal)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(AppError::internal)?;
        Self::init(pool).await
    }

    /// A private in-memory database, pinned to a single connection so every
    /// query sees the same data. Used by tests.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new().in_memory(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(AppError::internal)?;
        Self::init(pool).await
    }

    async fn init(pool: SqlitePool) -> Result<Self> {
        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(AppError::internal)?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl NoteRepo for SqliteNoteRepo {
    async fn list(&self, limit: i64) -> Result<Vec<Note>> {
        let rows = sqlx::query(
            "SELECT id, content, author, created_at FROM notes ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::internal)?;

        Ok(rows
            .into_iter()
            .map(|row| Note {
                id: row.get("id"),
                content: row.get("content"),
                author: row.get("author"),
                created_at: row.get::<DateTime<Utc>, _>("created_at"),
            })
            .collect())
    }

    async fn create(&self, content: &str, author: &str) -> Result<Note> {
        let created_at = Utc::now();
        let author = (!author.is_empty()).then(|| author.to_string());

        let result = sqlx::query("INSERT INTO notes (content, author, created_at) VALUES (?, ?, ?)")
            .bind(content)
            .bind(author.as_deref())
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(AppError::internal)?;

        Ok(Note {
            id: result.last_insert_rowid(),
            content: content.to_string(),
            author,
            created_at,
        })
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::internal)?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes")
            .execute(&self.pool)
            .await
            .map_err(AppError::internal)?;
        debug!(deleted = result.rows_affected(), "cleared notes table");
        Ok(())
    }
}
