pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod query_builder;
pub mod repository;

use std::sync::Arc;

use sqlx::PgPool;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryPlaceRepository, MemoryUserRepository};
pub use postgres::{PgPlaceRepository, PgUserRepository};
pub use repository::{PlaceRepository, UserRepository, PLACE_NOT_FOUND};

/// The pair of repositories a running service talks to.
#[derive(Clone)]
pub struct Storage {
    pub places: Arc<dyn PlaceRepository>,
    pub users: Arc<dyn UserRepository>,
    pub kind: StorageKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageKind {
    Memory,
    Postgres,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Memory => "memory",
            StorageKind::Postgres => "postgres",
        }
    }
}

impl Storage {
    pub fn memory() -> Self {
        Self {
            places: Arc::new(MemoryPlaceRepository::new()),
            users: Arc::new(MemoryUserRepository::new()),
            kind: StorageKind::Memory,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            places: Arc::new(PgPlaceRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool)),
            kind: StorageKind::Postgres,
        }
    }
}
