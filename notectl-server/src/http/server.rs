//! Axum server setup
//!
//! Lifecycle:
//! 1. Open the pool and ensure the notes table exists
//! 2. Serve until Ctrl+C or SIGTERM, draining in-flight requests
//! 3. Close the pool once serving has stopped

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::DatabaseConfig;
use crate::db::{schema, Database, DbError, NoteRepo, NoteStore};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8000)
    pub bind_addr: SocketAddr,

    pub database: DatabaseConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            database: DatabaseConfig::default(),
        }
    }
}

/// Shared application state, constructed once at startup and handed to
/// every handler through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteStore>,
}

impl AppState {
    pub fn new(notes: impl NoteStore + 'static) -> Self {
        Self {
            notes: Arc::new(notes),
        }
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    // Any origin, method and header. Not suitable for production.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::notes::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let config = ServerConfig::default();
/// run_server(config).await?;
/// ```
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = Database::connect(&config.database).await?;

    if let Err(e) = schema::ensure(&db).await {
        db.disconnect().await;
        return Err(e.into());
    }

    let served = serve(db.clone(), config.bind_addr).await;

    // Release the pool exactly once, after the listener is gone
    db.disconnect().await;
    tracing::info!("Server shutdown complete");
    served
}

async fn serve(db: Database, bind_addr: SocketAddr) -> Result<(), ServerError> {
    let state = AppState::new(NoteRepo::new(db));
    let app = build_router(state);

    tracing::warn!("CORS: Permissive mode enabled - all origins allowed");

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Database(#[from] DbError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::db::MemoryNoteStore;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.database.port, 5432);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let app = build_router(AppState::new(MemoryNoteStore::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/notes/")
                    .header("origin", "http://client.example")
                    .header("access-control-request-method", "DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn unreachable_database_fails_startup() {
        let config = ServerConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            database: DatabaseConfig {
                host: "127.0.0.1".into(),
                port: 1,
                acquire_timeout: std::time::Duration::from_secs(2),
                ..DatabaseConfig::default()
            },
        };

        let err = run_server(config).await.unwrap_err();
        assert!(matches!(err, ServerError::Database(ref e) if e.is_connection()));
    }
}
