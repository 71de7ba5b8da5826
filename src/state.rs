use std::sync::Arc;

use crate::auth::{AuthGate, SessionAuthGate};
use crate::config::AppConfig;
use crate::database::{PlaceRepository, Storage};

/// Shared resources handed to every handler through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storage: Storage,
    pub gate: Arc<dyn AuthGate>,
}

impl AppState {
    /// Wires the default [`SessionAuthGate`] on top of the storage's user repository.
    pub fn new(config: AppConfig, storage: Storage) -> Self {
        let gate = Arc::new(SessionAuthGate::new(
            storage.users.clone(),
            config.security.bcrypt_cost,
        ));
        Self::with_gate(config, storage, gate)
    }

    pub fn with_gate(config: AppConfig, storage: Storage, gate: Arc<dyn AuthGate>) -> Self {
        Self {
            config: Arc::new(config),
            storage,
            gate,
        }
    }

    pub fn places(&self) -> &dyn PlaceRepository {
        self.storage.places.as_ref()
    }

    pub fn auth_enabled(&self) -> bool {
        self.config.auth.enabled
    }
}
