//! Data access error taxonomy

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Store unreachable, credentials rejected, pool exhausted or closed
    #[error("connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Constraint violation, malformed statement, or undecodable row
    #[error("statement error: {0}")]
    Statement(#[source] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if is_connection_failure(&e) {
            Self::Connection(e)
        } else {
            Self::Statement(e)
        }
    }
}

fn is_connection_failure(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Configuration(_)
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => true,
        // Rejected credentials (28xxx) and unknown databases (3D000) arrive
        // as server errors during the handshake.
        sqlx::Error::Database(db) => db
            .code()
            .is_some_and(|code| code.starts_with("28") || code.starts_with("3D")),
        _ => false,
    }
}
