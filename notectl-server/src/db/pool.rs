//! Database connection pool management
//!
//! Uses sqlx PgPool with an explicit, small connection bound. When every
//! connection is checked out, callers wait for one to be released until the
//! acquire timeout elapses.

use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use super::error::DbError;
use super::statement::{Statement, StatementKind};
use crate::config::DatabaseConfig;

/// Result of running a non-query statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executed {
    /// Primary key generated by an INSERT
    pub last_id: Option<i32>,
    pub rows_affected: u64,
}

/// Handle to the pooled notes database.
///
/// Cheap to clone; all clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open the pool and verify the store accepts a connection.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Connection`] if the store is unreachable or
    /// rejects the credentials.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbError> {
        tracing::info!(
            url = %config.redacted_url(),
            max_connections = config.max_connections,
            "Connecting to database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.connection_url())
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::Statement(e) => DbError::Connection(e),
                other => other,
            })?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    ///
    /// Calling this on an already closed pool is a no-op.
    pub async fn disconnect(&self) {
        if self.pool.is_closed() {
            return;
        }
        tracing::info!("Closing database pool");
        self.pool.close().await;
    }

    /// Run an INSERT, UPDATE, DELETE or DDL statement.
    ///
    /// INSERT statements must end in `RETURNING id`; the generated key is
    /// reported in [`Executed::last_id`].
    pub async fn execute(&self, stmt: &Statement) -> Result<Executed, DbError> {
        tracing::debug!(sql = stmt.sql(), "execute");

        if stmt.kind() == StatementKind::Insert {
            let row = stmt.query().fetch_one(&self.pool).await?;
            let id: i32 = row.try_get(0)?;
            return Ok(Executed {
                last_id: Some(id),
                rows_affected: 1,
            });
        }

        let result = stmt.query().execute(&self.pool).await?;
        Ok(Executed {
            last_id: None,
            rows_affected: result.rows_affected(),
        })
    }

    /// Run a SELECT expected to return at most one row.
    ///
    /// Zero rows is `Ok(None)`, not an error.
    pub async fn fetch_one<T>(&self, stmt: &Statement) -> Result<Option<T>, DbError>
    where
        T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = stmt.sql(), "fetch_one");
        Ok(stmt.query_as::<T>().fetch_optional(&self.pool).await?)
    }

    /// Run a SELECT and collect every row in the order the store returns them.
    pub async fn fetch_all<T>(&self, stmt: &Statement) -> Result<Vec<T>, DbError>
    where
        T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = stmt.sql(), "fetch_all");
        Ok(stmt.query_as::<T>().fetch_all(&self.pool).await?)
    }
}
