//! Parameterized SQL statements
//!
//! A [`Statement`] pairs SQL text containing `$n` placeholders with the values
//! bound to them. Values never appear in the SQL text itself.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::Postgres;

/// What a statement does, which decides how [`Database::execute`] runs it.
///
/// [`Database::execute`]: super::Database::execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// DDL such as `CREATE TABLE`
    Define,
    /// `INSERT ... RETURNING id`
    Insert,
    Update,
    Delete,
    Select,
}

/// A value bound to a statement placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(i32),
    BigInt(i64),
    Text(String),
    Bool(bool),
}

/// A single parameterized SQL operation
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    kind: StatementKind,
    sql: String,
    params: Vec<Param>,
}

impl Statement {
    pub fn new(kind: StatementKind, sql: impl Into<String>) -> Self {
        Self {
            kind,
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Append a bound value for the next placeholder.
    pub fn bind(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Build an untyped sqlx query with all parameters bound.
    pub(crate) fn query(&self) -> Query<'_, Postgres, PgArguments> {
        self.params
            .iter()
            .fold(sqlx::query(&self.sql), |q, param| match param {
                Param::Int(v) => q.bind(*v),
                Param::BigInt(v) => q.bind(*v),
                Param::Text(v) => q.bind(v.as_str()),
                Param::Bool(v) => q.bind(*v),
            })
    }

    /// Build a typed sqlx query with all parameters bound.
    pub(crate) fn query_as<T>(&self) -> QueryAs<'_, Postgres, T, PgArguments>
    where
        T: for<'r> sqlx::FromRow<'r, PgRow>,
    {
        self.params
            .iter()
            .fold(sqlx::query_as(&self.sql), |q, param| match param {
                Param::Int(v) => q.bind(*v),
                Param::BigInt(v) => q.bind(*v),
                Param::Text(v) => q.bind(v.as_str()),
                Param::Bool(v) => q.bind(*v),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_in_order() {
        let stmt = Statement::new(StatementKind::Update, "UPDATE t SET a = $1 WHERE id = $2")
            .bind(Param::Text("x".into()))
            .bind(Param::Int(4));

        assert_eq!(stmt.kind(), StatementKind::Update);
        assert_eq!(stmt.params(), &[Param::Text("x".into()), Param::Int(4)]);
    }
}
