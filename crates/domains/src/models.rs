//! # Domain Models
//!
//! These structs represent the core entities of Pinwall.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single user-submitted message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Monotonic identifier assigned by the store, stable once assigned.
    pub id: i64,
    /// The note body; always trimmed and non-empty once stored.
    pub content: String,
    /// Optional author name. Absent authors serialize as `null` and render
    /// as "Anonymous" in the front-end.
    pub author: Option<String>,
    /// Assigned by the store at creation; never mutated afterwards.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_serializes_absent_author_as_null() {
        let note = Note {
            id: 7,
            content: "Hello world".to_string(),
            author: None,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["content"], "Hello world");
        assert!(value["author"].is_null());
        assert!(value["created_at"].is_string());
    }

    #[test]
    fn note_round_trips_through_json() {
        let note = Note {
            id: 1,
            content: "note".to_string(),
            author: Some("Ann".to_string()),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&note).unwrap();
        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
    }
}
