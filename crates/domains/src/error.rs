//! # AppError
//!
//! Centralized error handling for the Pinwall ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// Which rate-limit window a rejected request exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitScope {
    PerMinute,
    PerDay,
}

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation failure (e.g., missing or over-long note content)
    #[error("validation error: {0}")]
    Validation(String),

    /// Bad or missing admin secret
    #[error("unauthorized ({remaining_attempts} attempts remaining)")]
    Unauthorized { remaining_attempts: u64 },

    /// Too many failed admin attempts; the client must wait the window out
    #[error("locked out, retry in {retry_after_secs}s")]
    LockedOut { retry_after_secs: u64 },

    /// Rate limit exceeded on note creation
    #[error("too many requests, retry in {retry_after_secs}s")]
    RateLimited {
        scope: RateLimitScope,
        retry_after_secs: u64,
    },

    /// Infrastructure failure (e.g., storage or counter store down)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wraps an infrastructure failure, keeping the detail for server-side
    /// logs. Clients only ever see a generic message for these.
    pub fn internal(err: impl std::fmt::Display) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// A specialized Result type for Pinwall logic.
pub type Result<T> = std::result::Result<T, AppError>;
