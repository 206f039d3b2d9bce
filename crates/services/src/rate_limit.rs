//! Per-client rate limiting for note creation.
//!
//! Counters live behind the [`CounterStore`] port so the limits hold across
//! every server instance, not just the one that happened to see the request.

use std::sync::Arc;
use std::time::Duration;

use domains::{AppError, CounterStore, RateLimitScope, Result};
use tracing::debug;

/// Posting limits. Defaults match the production policy: one note per
/// minute and ten per day, per client address.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_minute: u64,
    pub minute_window: Duration,
    pub per_day: u64,
    pub day_window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_minute: 1,
            minute_window: Duration::from_secs(60),
            per_day: 10,
            day_window: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Fixed-window limiter keyed by client address.
#[derive(Clone)]
pub struct RateLimiter {
    counters: Arc<dyn CounterStore>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(counters: Arc<dyn CounterStore>, config: RateLimitConfig) -> Self {
        Self { counters, config }
    }

    /// Consumes one posting slot for `client`, rejecting once a window is
    /// spent.
    ///
    /// The minute window is checked first; a request bounced there does not
    /// eat into the daily allowance.
    pub async fn check_note_post(&self, client: &str) -> Result<()> {
        let minute_key = format!("rate:minute:{client}");
        let count = self
            .counters
            .incr(&minute_key, self.config.minute_window)
            .await?;
        if count > self.config.per_minute {
            debug!(client, count, "per-minute posting limit hit");
            return Err(AppError::RateLimited {
                scope: RateLimitScope::PerMinute,
                retry_after_secs: self.retry_after(&minute_key, self.config.minute_window).await,
            });
        }

        let day_key = format!("rate:day:{client}");
        let count = self.counters.incr(&day_key, self.config.day_window).await?;
        if count > self.config.per_day {
            debug!(client, count, "per-day posting limit hit");
            return Err(AppError::RateLimited {
                scope: RateLimitScope::PerDay,
                retry_after_secs: self.retry_after(&day_key, self.config.day_window).await,
            });
        }

        Ok(())
    }

    /// How long the client should wait, taken from the key's remaining TTL
    /// with the full window as a fallback.
    async fn retry_after(&self, key: &str, window: Duration) -> u64 {
        match self.counters.ttl(key).await {
            Ok(Some(left)) => left.as_secs().max(1),
            _ => window.as_secs(),
        }
    }
}
