//! The note entity and its request shape

use serde::{Deserialize, Serialize};

/// A persisted note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    /// Assigned by the store on insert, immutable afterwards
    pub id: i32,
    pub text: String,
    pub completed: bool,
}

/// Body of create and update requests.
///
/// An `id` in the body is ignored; ids come from the store or the path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoteInput {
    pub text: String,
    pub completed: bool,
}

impl NoteInput {
    /// Attach an id, producing the note this input describes.
    pub fn with_id(self, id: i32) -> Note {
        Note {
            id,
            text: self.text,
            completed: self.completed,
        }
    }
}

/// Body returned by a successful delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

impl DeleteConfirmation {
    pub fn for_note(id: i32) -> Self {
        Self {
            message: format!("Note with id: {} deleted successfully!", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_serializes_in_column_order() {
        let note = NoteInput {
            text: "Get groceries".into(),
            completed: false,
        }
        .with_id(1);
        assert_eq!(
            serde_json::to_string(&note).unwrap(),
            r#"{"id":1,"text":"Get groceries","completed":false}"#
        );
    }

    #[test]
    fn input_ignores_client_id() {
        let input: NoteInput =
            serde_json::from_str(r#"{"id":99,"text":"x","completed":true}"#).unwrap();
        assert_eq!(input.with_id(4).id, 4);
    }

    #[test]
    fn input_requires_both_fields() {
        assert!(serde_json::from_str::<NoteInput>(r#"{"text":"x"}"#).is_err());
        assert!(serde_json::from_str::<NoteInput>(r#"{"text":1,"completed":true}"#).is_err());
    }

    #[test]
    fn delete_message() {
        assert_eq!(
            DeleteConfirmation::for_note(1).message,
            "Note with id: 1 deleted successfully!"
        );
    }
}
