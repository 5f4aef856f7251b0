//! HTTP server command
//!
//! Runs the notes API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use notectl_server::{run_server, ServerConfig};

use crate::config::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "NOTECTL_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting notectl server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        database: args.db.into(),
    };

    // Blocks until shutdown; the pool is closed before this returns
    run_server(config).await.context("Server error")?;

    Ok(())
}
