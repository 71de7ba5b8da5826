pub mod password;
pub mod session;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::OnceCell;
use tower_sessions::Session;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, Signup, User};
use crate::database::repository::UserRepository;

pub use password::{hash_password, verify_password};
pub use session::{session_key, AuthSession};

/// The authenticated caller attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Identity provider used by the login flow and the request guard.
#[async_trait]
pub trait AuthGate: Send + Sync {
    /// `None` when the username is unknown or the password does not match.
    async fn verify(&self, credentials: &Credentials) -> Result<Option<Identity>, AuthError>;

    /// Resolve the session's user id to a user that still exists.
    async fn current_identity(&self, session: &Session) -> Result<Option<Identity>, AuthError>;

    /// Create a user with a hashed password.
    async fn register(&self, signup: Signup) -> Result<Identity, AuthError>;
}

/// [`AuthGate`] backed by a [`UserRepository`] and bcrypt hashes.
pub struct SessionAuthGate {
    users: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
    /// Compared against when the username is unknown, so both branches pay for bcrypt.
    dummy_hash: OnceCell<String>,
}

impl SessionAuthGate {
    pub fn new(users: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self {
            users,
            bcrypt_cost,
            dummy_hash: OnceCell::new(),
        }
    }

    async fn dummy_hash(&self) -> Result<&String, AuthError> {
        self.dummy_hash
            .get_or_try_init(|| hash_password("travelog-dummy-password".to_string(), self.bcrypt_cost))
            .await
    }
}

#[async_trait]
impl AuthGate for SessionAuthGate {
    async fn verify(&self, credentials: &Credentials) -> Result<Option<Identity>, AuthError> {
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return Ok(None);
        }

        let Some(user) = self.users.find_by_username(&credentials.username).await? else {
            tracing::warn!(username = %credentials.username, "login for unknown user");
            let dummy = self.dummy_hash().await?.clone();
            verify_password(credentials.password.clone(), dummy).await?;
            return Ok(None);
        };

        if verify_password(credentials.password.clone(), user.password_hash.clone()).await? {
            tracing::info!(username = %user.username, "login succeeded");
            Ok(Some(Identity::from(&user)))
        } else {
            tracing::warn!(username = %user.username, "login with wrong password");
            Ok(None)
        }
    }

    async fn current_identity(&self, session: &Session) -> Result<Option<Identity>, AuthError> {
        let Some(user_id) = AuthSession::new(session).get_user_id().await? else {
            return Ok(None);
        };

        let user = self.users.find_by_id(user_id).await?;
        if user.is_none() {
            tracing::warn!(%user_id, "session refers to a missing user");
        }
        Ok(user.as_ref().map(Identity::from))
    }

    async fn register(&self, signup: Signup) -> Result<Identity, AuthError> {
        let password_hash = hash_password(signup.password, self.bcrypt_cost).await?;
        let user = self
            .users
            .create(NewUser {
                email: signup.email,
                username: signup.username,
                password_hash,
            })
            .await?;
        tracing::info!(username = %user.username, "user registered");
        Ok(Identity::from(&user))
    }
}
