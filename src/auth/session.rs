//! Typed access to the authentication entries of a `tower-sessions` session.

use sha2::{Digest, Sha512};
use tower_sessions::{cookie::Key, Session};
use uuid::Uuid;

use super::AuthError;

const SESSION_AUTH_USER_ID: &str = "auth:user";

/// Wraps a [`Session`] and exposes only the logged-in user id.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Store the user id under a fresh session id.
    pub async fn set_user_id(&self, user_id: Uuid) -> Result<(), AuthError> {
        self.session.cycle_id().await?;
        self.session.insert(SESSION_AUTH_USER_ID, user_id).await?;
        Ok(())
    }

    pub async fn get_user_id(&self) -> Result<Option<Uuid>, AuthError> {
        Ok(self.session.get::<Uuid>(SESSION_AUTH_USER_ID).await?)
    }

    /// Drop the session record and expire the cookie.
    pub async fn clear(&self) -> Result<(), AuthError> {
        self.session.flush().await?;
        Ok(())
    }
}

/// Cookie signing key derived from the configured secret.
///
/// `Key::from` needs at least 64 bytes, which is exactly one SHA-512 digest.
pub fn session_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}
