//! Note repository
//!
//! [`NoteStore`] is the seam between handlers and storage:
//! - [`NoteRepo`] runs one PostgreSQL statement per call
//! - [`MemoryNoteStore`] is an in-process stand-in for tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::db::{schema, Database, DbError};
use crate::models::{Note, NoteInput, Window};

const RESOURCE: &str = "note";

/// Storage operations behind the notes endpoints (testable)
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert a note, returning it with its generated id.
    async fn create(&self, input: NoteInput) -> Result<Note, DbError>;

    /// Replace text/completed of an existing note.
    async fn update(&self, id: i32, input: NoteInput) -> Result<Note, DbError>;

    /// One window of notes in id order.
    async fn list(&self, window: Window) -> Result<Vec<Note>, DbError>;

    async fn get(&self, id: i32) -> Result<Note, DbError>;

    async fn delete(&self, id: i32) -> Result<(), DbError>;

    /// Check that the store answers at all.
    async fn ping(&self) -> Result<(), DbError>;
}

/// PostgreSQL-backed note repository
#[derive(Debug, Clone)]
pub struct NoteRepo {
    db: Database,
}

impl NoteRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoteStore for NoteRepo {
    async fn create(&self, input: NoteInput) -> Result<Note, DbError> {
        let executed = self.db.execute(&schema::insert(&input)).await?;
        let id = executed
            .last_id
            .ok_or(DbError::Statement(sqlx::Error::RowNotFound))?;
        Ok(input.with_id(id))
    }

    /// A miss is detected from rows affected by the UPDATE itself.
    async fn update(&self, id: i32, input: NoteInput) -> Result<Note, DbError> {
        let executed = self.db.execute(&schema::update(id, &input)).await?;
        if executed.rows_affected == 0 {
            return Err(DbError::not_found(RESOURCE, id));
        }
        Ok(input.with_id(id))
    }

    async fn list(&self, window: Window) -> Result<Vec<Note>, DbError> {
        self.db.fetch_all(&schema::select_page(window)).await
    }

    async fn get(&self, id: i32) -> Result<Note, DbError> {
        self.db
            .fetch_one(&schema::select_by_id(id))
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        let executed = self.db.execute(&schema::delete(id)).await?;
        if executed.rows_affected == 0 {
            return Err(DbError::not_found(RESOURCE, id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.db.fetch_one::<(i32,)>(&schema::ping()).await?;
        Ok(())
    }
}

/// In-memory note store for testing.
///
/// Ids are assigned from a counter starting at 1, like a fresh `SERIAL`.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    notes: Vec<Note>,
    next_id: i32,
    unavailable: bool,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().unwrap().unavailable = unavailable;
    }

    fn with<T>(&self, f: impl FnOnce(&mut MemoryInner) -> Result<T, DbError>) -> Result<T, DbError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.unavailable {
            return Err(DbError::Connection(sqlx::Error::PoolTimedOut));
        }
        f(&mut inner)
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn create(&self, input: NoteInput) -> Result<Note, DbError> {
        self.with(|inner| {
            inner.next_id += 1;
            let note = input.with_id(inner.next_id);
            inner.notes.push(note.clone());
            Ok(note)
        })
    }

    async fn update(&self, id: i32, input: NoteInput) -> Result<Note, DbError> {
        self.with(|inner| {
            let slot = inner
                .notes
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| DbError::not_found(RESOURCE, id))?;
            *slot = input.with_id(id);
            Ok(slot.clone())
        })
    }

    async fn list(&self, window: Window) -> Result<Vec<Note>, DbError> {
        self.with(|inner| Ok(inner.notes[window.range(inner.notes.len())].to_vec()))
    }

    async fn get(&self, id: i32) -> Result<Note, DbError> {
        self.with(|inner| {
            inner
                .notes
                .iter()
                .find(|n| n.id == id)
                .cloned()
                .ok_or_else(|| DbError::not_found(RESOURCE, id))
        })
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        self.with(|inner| {
            let before = inner.notes.len();
            inner.notes.retain(|n| n.id != id);
            if inner.notes.len() == before {
                return Err(DbError::not_found(RESOURCE, id));
            }
            Ok(())
        })
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.with(|_| Ok(()))
    }
}
