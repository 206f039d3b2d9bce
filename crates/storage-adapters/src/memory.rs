//! In-process implementation of `CounterStore`.
//!
//! Correct for a single server instance only: counters are invisible to
//! other processes. Used by tests and by deployments that run without a
//! shared counter service.

use async_trait::async_trait;
use dashmap::DashMap;
use domains::{CounterStore, Result};
use std::time::{Duration, Instant};

struct Entry {
    count: u64,
    expires_at: Instant,
}

#[derive(Default)]
pub struct MemoryCounterStore {
    entries: DashMap<String, Entry>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn incr(&self, key: &str, ttl: Duration) -> Result<u64> {
        let now = Instant::now();
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry {
                count: 0,
                expires_at: now + ttl,
            });

        if entry.expires_at <= now {
            // Window elapsed; the key starts over.
            entry.count = 0;
            entry.expires_at = now + ttl;
        }
        entry.count += 1;
        Ok(entry.count)
    }

    async fn get(&self, key: &str) -> Result<Option<u64>> {
        let now = Instant::now();
        Ok(self
            .entries
            .get(key)
            .and_then(|entry| (entry.expires_at > now).then_some(entry.count)))
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>> {
        let now = Instant::now();
        Ok(self
            .entries
            .get(key)
            .and_then(|entry| entry.expires_at.checked_duration_since(now)))
    }
}
