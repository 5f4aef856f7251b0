//! notectl-server: note CRUD over HTTP, backed by PostgreSQL
//!
//! Five endpoints under `/notes/` map one-to-one onto parameterized
//! statements against a single `notes` table, executed through a small
//! bounded connection pool.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{DatabaseConfig, SslMode};
pub use db::{Database, DbError};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
