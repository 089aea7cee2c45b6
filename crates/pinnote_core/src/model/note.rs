//! Note domain model.
//!
//! # Responsibility
//! - Define the record persisted in the notes slot and in backup payloads.
//! - Normalize user input (trimming) at construction time.
//!
//! # Invariants
//! - `id` is stable, unique, and ordered by creation time.
//! - `text` is never empty after trimming for notes built via `from_input`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one note.
///
/// UUIDv7 keeps ids time-ordered, so a plain id sort matches creation order.
pub type NoteId = Uuid;

/// One persisted note.
///
/// The serialized form is `{"id": "...", "text": "..."}`; a collection is a
/// JSON array of these, newest first. The same shape is used for the durable
/// notes slot and for backup payloads, so backup round-trips compare with
/// plain equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable creation-ordered ID.
    pub id: NoteId,
    /// User text, trimmed at creation.
    pub text: String,
}

impl Note {
    /// Builds a note from raw user input.
    ///
    /// Trims the input first; returns `None` when nothing remains, so blank
    /// submissions never turn into records.
    pub fn from_input(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::now_v7(),
            text: trimmed.to_string(),
        })
    }

    /// Builds a note with a caller-provided ID.
    ///
    /// Used by import paths where identity already exists externally. Does
    /// not re-validate `text`.
    pub fn with_id(id: NoteId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Note;

    #[test]
    fn from_input_trims_surrounding_whitespace() {
        let note = Note::from_input("  Buy milk \n").expect("non-blank input should build");
        assert_eq!(note.text, "Buy milk");
    }

    #[test]
    fn from_input_rejects_blank_input() {
        assert!(Note::from_input("   ").is_none());
        assert!(Note::from_input("").is_none());
        assert!(Note::from_input("\t\n").is_none());
    }

    #[test]
    fn ids_are_unique_and_creation_ordered() {
        let first = Note::from_input("first").expect("should build");
        let second = Note::from_input("second").expect("should build");
        assert_ne!(first.id, second.id);
        assert!(first.id < second.id);
    }
}
