//! # auth-adapters
//!
//! Shared-secret admin authentication with brute-force lockout.
//!
//! Failure counters go through the `CounterStore` port, so a client that
//! hammers one instance is locked out on all of them.

use std::sync::Arc;
use std::time::Duration;

use domains::{AppError, CounterStore, Result};
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

/// Lockout policy. Defaults: five failed attempts inside one hour.
#[derive(Debug, Clone)]
pub struct LockoutConfig {
    pub max_failures: u64,
    pub window: Duration,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_failures: 5,
            window: Duration::from_secs(60 * 60),
        }
    }
}

/// Gates admin operations behind the shared secret.
#[derive(Clone)]
pub struct AdminGuard {
    secret: SecretString,
    counters: Arc<dyn CounterStore>,
    config: LockoutConfig,
}

impl AdminGuard {
    pub fn new(secret: SecretString, counters: Arc<dyn CounterStore>, config: LockoutConfig) -> Self {
        Self {
            secret,
            counters,
            config,
        }
    }

    /// Admits or rejects one admin request from `client`.
    ///
    /// Once the failure threshold is reached, every request from that client
    /// is refused until the window expires, whatever secret it presents.
    /// A correct secret does not clear an existing failure count; the
    /// window's expiry is the only reset.
    pub async fn authorize(&self, client: &str, presented: Option<&str>) -> Result<()> {
        let key = format!("admin:failures:{client}");

        let failures = self.counters.get(&key).await?.unwrap_or(0);
        if failures >= self.config.max_failures {
            let retry_after_secs = match self.counters.ttl(&key).await? {
                Some(left) => left.as_secs().max(1),
                None => self.config.window.as_secs(),
            };
            warn!(client, failures, "admin lockout active");
            return Err(AppError::LockedOut { retry_after_secs });
        }

        if let Some(secret) = presented {
            if secret == self.secret.expose_secret() {
                return Ok(());
            }
        }

        let failures = self.counters.incr(&key, self.config.window).await?;
        let remaining_attempts = self.config.max_failures.saturating_sub(failures);
        warn!(client, failures, "admin authentication failed");
        Err(AppError::Unauthorized { remaining_attempts })
    }
}
