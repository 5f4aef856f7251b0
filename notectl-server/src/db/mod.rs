//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - One bounded connection pool, owned by [`Database`] - no global state
//! - Every operation is exactly one parameterized statement
//! - Misses are detected from the statement result, not a follow-up query

pub mod error;
pub mod pool;
pub mod repos;
pub mod schema;
pub mod statement;

pub use error::DbError;
pub use pool::{Database, Executed};
pub use repos::*;
pub use statement::{Param, Statement, StatementKind};
