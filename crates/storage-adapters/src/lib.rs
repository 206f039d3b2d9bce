//! # storage-adapters
//!
//! Implementations of the persistence and counter ports. Backends are
//! feature-gated so deployments compile only what they actually run.

#[cfg(feature = "db-sqlite")]
mod sqlite;
#[cfg(feature = "db-sqlite")]
pub use sqlite::SqliteNoteRepo;

#[cfg(feature = "store-file")]
mod file;
#[cfg(feature = "store-file")]
pub use file::JsonFileNoteRepo;

#[cfg(feature = "redis")]
mod redis;
#[cfg(feature = "redis")]
pub use redis::RedisCounterStore;

mod memory;
pub use memory::MemoryCounterStore;
