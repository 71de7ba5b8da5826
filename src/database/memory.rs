use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewPlace, NewUser, Place, PlacePatch, User};
use crate::database::repository::{place_not_found, PlaceRepository, UserRepository};
use crate::filter::PlaceFilter;

fn visible_to(place: &Place, id: Uuid, owner: Option<Uuid>) -> bool {
    place.id == id && owner.map_or(true, |o| place.owner == Some(o))
}

/// Process-local place store. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryPlaceRepository {
    places: Arc<RwLock<Vec<Place>>>,
}

impl MemoryPlaceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.places.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.places.read().await.is_empty()
    }
}

#[async_trait]
impl PlaceRepository for MemoryPlaceRepository {
    async fn find_many(&self, filter: &PlaceFilter) -> Result<Vec<Place>, DatabaseError> {
        let places = self.places.read().await;
        Ok(places.iter().filter(|p| filter.matches(p)).cloned().collect())
    }

    async fn find_one(&self, id: Uuid, owner: Option<Uuid>) -> Result<Place, DatabaseError> {
        let places = self.places.read().await;
        places
            .iter()
            .find(|p| visible_to(p, id, owner))
            .cloned()
            .ok_or_else(place_not_found)
    }

    async fn create(&self, place: NewPlace, owner: Option<Uuid>) -> Result<Place, DatabaseError> {
        let place = Place::new(Uuid::new_v4(), place, owner);
        self.places.write().await.push(place.clone());
        Ok(place)
    }

    async fn update(&self, id: Uuid, patch: &PlacePatch, owner: Option<Uuid>) -> Result<Place, DatabaseError> {
        let mut places = self.places.write().await;
        let place = places
            .iter_mut()
            .find(|p| visible_to(p, id, owner))
            .ok_or_else(place_not_found)?;
        place.apply(patch)?;
        Ok(place.clone())
    }

    async fn delete(&self, id: Uuid, owner: Option<Uuid>) -> Result<Place, DatabaseError> {
        let mut places = self.places.write().await;
        let index = places
            .iter()
            .position(|p| visible_to(p, id, owner))
            .ok_or_else(place_not_found)?;
        Ok(places.remove(index))
    }
}

/// Process-local user store with unique usernames.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(DatabaseError::Conflict(format!(
                "Username '{}' is already taken",
                user.username
            )));
        }
        let user = User::new(Uuid::new_v4(), user);
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}
