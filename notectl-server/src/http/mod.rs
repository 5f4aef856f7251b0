//! HTTP server layer
//!
//! Axum server with:
//! - Permissive CORS (any origin, method, header)
//! - Request tracing
//! - Graceful shutdown followed by pool release
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
