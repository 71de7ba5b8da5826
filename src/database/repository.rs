use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewPlace, NewUser, Place, PlacePatch, User};
use crate::filter::PlaceFilter;

/// Message carried by every id-scoped miss.
pub const PLACE_NOT_FOUND: &str = "Place does not exist";

/// Place persistence.
///
/// Every id-scoped operation takes an optional owner. When it is set, a record
/// owned by someone else is indistinguishable from a missing one and yields
/// [`DatabaseError::NotFound`].
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// All places satisfying `filter`, in insertion order.
    async fn find_many(&self, filter: &PlaceFilter) -> Result<Vec<Place>, DatabaseError>;

    async fn find_one(&self, id: Uuid, owner: Option<Uuid>) -> Result<Place, DatabaseError>;

    async fn create(&self, place: NewPlace, owner: Option<Uuid>) -> Result<Place, DatabaseError>;

    /// Merge `patch` onto the stored record, re-validate, and return the result.
    async fn update(&self, id: Uuid, patch: &PlacePatch, owner: Option<Uuid>) -> Result<Place, DatabaseError>;

    /// Remove the record and hand it back.
    async fn delete(&self, id: Uuid, owner: Option<Uuid>) -> Result<Place, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// User persistence for the authenticated variant.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`DatabaseError::Conflict`] when the username is taken.
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;
}

pub(crate) fn place_not_found() -> DatabaseError {
    DatabaseError::NotFound(PLACE_NOT_FOUND.to_string())
}
