//! # services
//!
//! Application services over the domain ports: note validation and CRUD
//! orchestration, plus the posting rate-limit policy.

pub mod notes;
pub mod rate_limit;

pub use notes::{NoteService, MAX_CONTENT_CHARS, PUBLIC_LIST_LIMIT};
pub use rate_limit::{RateLimitConfig, RateLimiter};
