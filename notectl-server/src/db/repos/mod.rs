//! Repository implementations for database access
//!
//! Each repository method issues exactly one statement built by
//! [`schema`](super::schema).

pub mod notes;

pub use notes::{MemoryNoteStore, NoteRepo, NoteStore};
