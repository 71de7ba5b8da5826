use anyhow::Context;
use clap::Args;
use serde_json::json;
use tower_sessions_sqlx_store::PostgresStore;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;
use crate::database::{DatabaseError, DatabaseManager};

#[derive(Args, Debug, Default)]
pub struct MigrateArgs {
    #[arg(long, help = "Postgres connection string (overrides DATABASE_URL)")]
    pub database_url: Option<String>,
}

pub async fn handle(args: MigrateArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let url = args
        .database_url
        .or(config.database.url.clone())
        .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

    let pool = DatabaseManager::connect(&url, &config.database).await?;
    DatabaseManager::migrate(&pool).await?;
    PostgresStore::new(pool.clone())
        .migrate()
        .await
        .context("failed to migrate session table")?;

    output_success(
        &output_format,
        "Schema is up to date",
        Some(json!({ "database": DatabaseManager::redacted(&url)? })),
    )
}
