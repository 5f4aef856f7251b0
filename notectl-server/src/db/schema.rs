//! The `notes` table and every statement issued against it
//!
//! Column names live here and nowhere else; the repository and the table
//! bootstrap both go through these builders.

use super::statement::{Param, Statement, StatementKind};
use super::{DbError, Database};
use crate::models::{NoteInput, Window};

pub const TABLE: &str = "notes";

/// Physical columns of the notes table, in select order
pub const COLUMNS: [&str; 3] = ["id", "text", "completed"];

/// `CREATE TABLE IF NOT EXISTS notes (...)`
///
/// `text` and `completed` are NOT NULL so every stored row decodes into a
/// `Note`. No length limits, no uniqueness beyond the primary key.
pub fn create_table() -> Statement {
    Statement::new(
        StatementKind::Define,
        format!(
            "CREATE TABLE IF NOT EXISTS {TABLE} (\
             id SERIAL PRIMARY KEY, \
             text VARCHAR NOT NULL, \
             completed BOOLEAN NOT NULL)"
        ),
    )
}

pub fn insert(input: &NoteInput) -> Statement {
    Statement::new(
        StatementKind::Insert,
        format!("INSERT INTO {TABLE} (text, completed) VALUES ($1, $2) RETURNING id"),
    )
    .bind(Param::Text(input.text.clone()))
    .bind(Param::Bool(input.completed))
}

pub fn update(id: i32, input: &NoteInput) -> Statement {
    Statement::new(
        StatementKind::Update,
        format!("UPDATE {TABLE} SET text = $1, completed = $2 WHERE id = $3"),
    )
    .bind(Param::Text(input.text.clone()))
    .bind(Param::Bool(input.completed))
    .bind(Param::Int(id))
}

/// One page of notes in id (insertion) order.
pub fn select_page(window: Window) -> Statement {
    Statement::new(
        StatementKind::Select,
        format!(
            "SELECT {} FROM {TABLE} ORDER BY id OFFSET $1 LIMIT $2",
            COLUMNS.join(", ")
        ),
    )
    .bind(Param::BigInt(i64::from(window.skip)))
    .bind(Param::BigInt(i64::from(window.take)))
}

pub fn select_by_id(id: i32) -> Statement {
    Statement::new(
        StatementKind::Select,
        format!("SELECT {} FROM {TABLE} WHERE id = $1", COLUMNS.join(", ")),
    )
    .bind(Param::Int(id))
}

pub fn delete(id: i32) -> Statement {
    Statement::new(
        StatementKind::Delete,
        format!("DELETE FROM {TABLE} WHERE id = $1"),
    )
    .bind(Param::Int(id))
}

/// Round trip that touches no table, for readiness checks.
pub fn ping() -> Statement {
    Statement::new(StatementKind::Select, "SELECT 1::int4")
}

/// Create the notes table if it does not exist yet.
pub async fn ensure(db: &Database) -> Result<(), DbError> {
    tracing::info!(table = TABLE, "Ensuring schema");
    db.execute(&create_table()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groceries() -> NoteInput {
        NoteInput {
            text: "Get groceries".into(),
            completed: false,
        }
    }

    #[test]
    fn create_table_is_idempotent_ddl() {
        let stmt = create_table();
        assert_eq!(stmt.kind(), StatementKind::Define);
        assert!(stmt.sql().starts_with("CREATE TABLE IF NOT EXISTS notes"));
        assert!(stmt.sql().contains("id SERIAL PRIMARY KEY"));
        assert!(stmt.params().is_empty());
    }

    #[test]
    fn insert_returns_generated_id() {
        let stmt = insert(&groceries());
        assert_eq!(stmt.kind(), StatementKind::Insert);
        assert!(stmt.sql().ends_with("RETURNING id"));
        assert_eq!(
            stmt.params(),
            &[Param::Text("Get groceries".into()), Param::Bool(false)]
        );
    }

    #[test]
    fn update_binds_id_last() {
        let stmt = update(1, &groceries());
        assert!(stmt.sql().contains("WHERE id = $3"));
        assert_eq!(stmt.params().last(), Some(&Param::Int(1)));
    }

    #[test]
    fn page_is_ordered_by_id() {
        let stmt = select_page(Window { skip: 10, take: 20 });
        assert_eq!(
            stmt.sql(),
            "SELECT id, text, completed FROM notes ORDER BY id OFFSET $1 LIMIT $2"
        );
        assert_eq!(stmt.params(), &[Param::BigInt(10), Param::BigInt(20)]);
    }

    #[test]
    fn values_are_never_interpolated() {
        let input = NoteInput {
            text: "'); DROP TABLE notes; --".into(),
            completed: true,
        };
        for stmt in [insert(&input), update(3, &input)] {
            assert!(!stmt.sql().contains("DROP"));
        }
        assert_eq!(delete(9).sql(), "DELETE FROM notes WHERE id = $1");
        assert_eq!(select_by_id(9).params(), &[Param::Int(9)]);
    }
}
