use anyhow::Context;
use clap::Args;
use tower_sessions::MemoryStore;
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AppConfig;
use crate::database::{DatabaseError, DatabaseManager, Storage, StorageKind};
use crate::state::AppState;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides TRAVELOG_PORT / PORT)")]
    pub port: Option<u16>,

    #[arg(long, value_enum, help = "Storage backend; defaults to postgres when a database URL is set")]
    pub storage: Option<StorageKind>,

    #[arg(long, help = "Postgres connection string (overrides DATABASE_URL)")]
    pub database_url: Option<String>,

    #[arg(long, overrides_with = "no_auth", help = "Require login for place routes")]
    pub auth: bool,

    #[arg(long, overrides_with = "auth", help = "Serve place routes without login")]
    pub no_auth: bool,
}

impl ServeArgs {
    pub fn auth_override(&self) -> Option<bool> {
        match (self.auth, self.no_auth) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Command-line flags win over the environment.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.api.port = port;
        }
        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }
        if let Some(enabled) = self.auth_override() {
            config.auth.enabled = enabled;
        }
    }

    pub fn storage_kind(&self, config: &AppConfig) -> StorageKind {
        self.storage.unwrap_or(match config.database.url {
            Some(_) => StorageKind::Postgres,
            None => StorageKind::Memory,
        })
    }
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env();
    args.apply(&mut config);
    config.validate()?;

    let kind = args.storage_kind(&config);
    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    tracing::info!(
        environment = ?config.environment,
        storage = kind.as_str(),
        auth = config.auth.enabled,
        "Starting travelog"
    );

    let router = match kind {
        StorageKind::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            crate::app(AppState::new(config, Storage::memory()), MemoryStore::default())
        }
        StorageKind::Postgres => {
            let url = config
                .database
                .url
                .clone()
                .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
            let pool = DatabaseManager::connect(&url, &config.database).await?;
            DatabaseManager::migrate(&pool).await?;

            let store = PostgresStore::new(pool.clone());
            store.migrate().await.context("failed to migrate session table")?;

            crate::app(AppState::new(config, Storage::postgres(pool)), store)
        }
    };

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Travelog listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
