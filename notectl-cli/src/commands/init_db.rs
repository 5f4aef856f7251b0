//! Create the notes table without starting the server

use anyhow::{Context, Result};
use clap::Parser;

use notectl_server::db::schema;
use notectl_server::{Database, DatabaseConfig};

use crate::config::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let config = DatabaseConfig::from(args.db);
    let db = Database::connect(&config)
        .await
        .context("Failed to connect to database")?;

    let result = schema::ensure(&db).await;
    db.disconnect().await;
    result.context("Failed to create notes table")?;

    println!("notes table ready ({})", config.redacted_url());
    Ok(())
}
