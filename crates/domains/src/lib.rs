//! # domains
//!
//! The central domain logic and interface definitions for Pinwall.

pub mod error;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;
