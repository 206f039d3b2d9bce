//! # Core Traits (Ports)
//!
//! Adapters implement these traits to be wired into the binaries.

use crate::error::Result;
use crate::models::Note;
use async_trait::async_trait;
use std::time::Duration;

/// Data persistence contract for notes.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait NoteRepo: Send + Sync {
    /// The most recent notes, newest first. Never returns more than `limit`.
    async fn list(&self, limit: i64) -> Result<Vec<Note>>;

    /// Persists a new note with a freshly assigned id and the current
    /// timestamp. An empty `author` is stored as absent.
    async fn create(&self, content: &str, author: &str) -> Result<Note>;

    /// Removes the matching note if present. Unknown ids are not an error.
    async fn delete_by_id(&self, id: i64) -> Result<()>;

    /// Empties the store.
    async fn delete_all(&self) -> Result<()>;
}

/// Shared counter service with per-key expiry.
///
/// Rate-limit and lockout counters go through this port so they can live in
/// a store every server instance observes, rather than process memory.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Increments `key`, creating it with the given `ttl` when absent.
    /// Returns the count after the increment.
    async fn incr(&self, key: &str, ttl: Duration) -> Result<u64>;

    /// The current count, or `None` when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<u64>>;

    /// Remaining lifetime of `key`, or `None` when it has no expiry left.
    async fn ttl(&self, key: &str) -> Result<Option<Duration>>;
}
