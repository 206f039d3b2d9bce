//! Redis implementation of `CounterStore`.
//!
//! `INCR` plus `EXPIRE`-on-create gives fixed windows that every server
//! instance observes, which keeps rate limits and lockouts honest under
//! horizontal scaling.

use async_trait::async_trait;
use deadpool_redis::redis::cmd;
use deadpool_redis::{Config, Connection, Pool, Runtime};
use domains::{AppError, CounterStore, Result};
use std::time::Duration;

#[derive(Clone)]
pub struct RedisCounterStore {
    pool: Pool,
}

impl RedisCounterStore {
    /// Builds a pooled client for `url` (e.g. `redis://127.0.0.1:6379`).
    /// Connections are established lazily.
    pub fn new(url: &str) -> Result<Self> {
        let pool = Config::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(AppError::internal)?;
        Ok(Self { pool })
    }

    async fn conn(&self) -> Result<Connection> {
        self.pool.get().await.map_err(AppError::internal)
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn incr(&self, key: &str, ttl: Duration) -> Result<u64> {
        let mut conn = self.conn().await?;
        let count: u64 = cmd("INCR")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(AppError::internal)?;

        // A count of 1 means INCR just created the key; start its window.
        if count == 1 {
            let _: () = cmd("EXPIRE")
                .arg(key)
                .arg(ttl.as_secs())
                .query_async(&mut conn)
                .await
                .map_err(AppError::internal)?;
        }
        Ok(count)
    }

    async fn get(&self, key: &str) -> Result<Option<u64>> {
        let mut conn = self.conn().await?;
        cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(AppError::internal)
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>> {
        let mut conn = self.conn().await?;
        let secs: i64 = cmd("TTL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(AppError::internal)?;

        // -1 (no expiry) and -2 (no key) both mean there is no window to
        // wait out.
        Ok((secs > 0).then(|| Duration::from_secs(secs as u64)))
    }
}
