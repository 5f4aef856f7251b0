//! Configuration loading: `.env` files and database flags

use std::time::Duration;

use clap::Args;
use notectl_server::config::{DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS};
use notectl_server::{DatabaseConfig, SslMode};
use tracing::debug;

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.notectl/.env
///
/// Returns the files that were loaded. Runs before tracing is initialized,
/// so the caller logs the result.
pub fn load_dotenv() -> Vec<String> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path.display().to_string());
    }

    if let Some(home_dir) = dirs::home_dir() {
        let env_file = home_dir.join(".notectl").join(".env");
        // dotenvy doesn't overwrite existing vars, so this is safe
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded_from.push(env_file.display().to_string());
        }
    }

    loaded_from
}

/// Log which .env files were applied.
pub fn report_dotenv(loaded_from: &[String]) {
    if loaded_from.is_empty() {
        debug!("No .env files found (current dir or ~/.notectl)");
    } else {
        tracing::info!("Loaded configuration from: {}", loaded_from.join(", "));
    }
}

/// Database connection flags
///
/// Environment names are the lowercase deployment variables already in use.
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database host
    #[arg(long = "db-host", env = "host_server", default_value = "localhost")]
    pub host: String,

    /// Database port
    #[arg(long = "db-port", env = "db_server_port", default_value_t = 5432)]
    pub port: u16,

    /// Database name
    #[arg(long = "db-name", env = "database_name", default_value = "test")]
    pub database: String,

    /// Database user
    #[arg(long = "db-user", env = "db_username", default_value = "postgres")]
    pub username: String,

    /// Database password
    #[arg(
        long = "db-password",
        env = "db_password",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub password: String,

    /// SSL negotiation mode
    #[arg(long, env = "ssl_mode", value_enum, default_value_t = SslMode::Prefer)]
    pub ssl_mode: SslMode,

    /// Maximum pooled connections
    #[arg(long, env = "NOTECTL_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Seconds to wait for a free pooled connection
    #[arg(long, env = "NOTECTL_ACQUIRE_TIMEOUT", default_value_t = DEFAULT_ACQUIRE_TIMEOUT_SECS)]
    pub acquire_timeout: u64,
}

impl From<DatabaseArgs> for DatabaseConfig {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            database: args.database,
            username: args.username,
            password: args.password,
            ssl_mode: args.ssl_mode,
            max_connections: args.max_connections.max(1),
            acquire_timeout: Duration::from_secs(args.acquire_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        db: DatabaseArgs,
    }

    #[test]
    fn flags_build_config() {
        let harness = Harness::parse_from([
            "test",
            "--db-host",
            "db.internal",
            "--db-password",
            "p@ss",
            "--ssl-mode",
            "require",
            "--max-connections",
            "0",
        ]);
        let config = DatabaseConfig::from(harness.db);
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.ssl_mode, SslMode::Require);
        assert_eq!(config.max_connections, 1);
        assert!(config.connection_url().contains(":p%40ss@db.internal:"));
    }
}
