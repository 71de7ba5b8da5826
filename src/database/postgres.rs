use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager, PLACES_TABLE};
use crate::database::models::{NewPlace, NewUser, Place, PlacePatch, User};
use crate::database::query_builder::QueryBuilder;
use crate::database::repository::{place_not_found, PlaceRepository, UserRepository};
use crate::filter::PlaceFilter;

/// `$2` is the optional owner; a NULL owner leaves the row unscoped.
const OWNER_SCOPE: &str = r#"("owner" = $2 OR $2::uuid IS NULL)"#;

#[derive(Clone)]
pub struct PgPlaceRepository {
    pool: PgPool,
}

impl PgPlaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaceRepository for PgPlaceRepository {
    async fn find_many(&self, filter: &PlaceFilter) -> Result<Vec<Place>, DatabaseError> {
        QueryBuilder::<Place>::new(PLACES_TABLE)
            .filter(filter.clone())
            .select_all(&self.pool)
            .await
    }

    async fn find_one(&self, id: Uuid, owner: Option<Uuid>) -> Result<Place, DatabaseError> {
        let sql = format!(r#"SELECT * FROM "places" WHERE "id" = $1 AND {}"#, OWNER_SCOPE);
        sqlx::query_as::<_, Place>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(place_not_found)
    }

    async fn create(&self, place: NewPlace, owner: Option<Uuid>) -> Result<Place, DatabaseError> {
        let row = sqlx::query_as::<_, Place>(
            r#"INSERT INTO "places" (
                "id", "place_name", "city_name", "country_name", "state_name",
                "arrival_date", "experience_rating", "expense_rating", "owner"
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(&place.place_name)
        .bind(&place.city_name)
        .bind(&place.country_name)
        .bind(&place.state_name)
        .bind(place.arrival_date)
        .bind(place.experience_rating)
        .bind(place.expense_rating)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, patch: &PlacePatch, owner: Option<Uuid>) -> Result<Place, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let select = format!(r#"SELECT * FROM "places" WHERE "id" = $1 AND {} FOR UPDATE"#, OWNER_SCOPE);
        let mut place = sqlx::query_as::<_, Place>(&select)
            .bind(id)
            .bind(owner)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(place_not_found)?;

        // Dropping the transaction on a validation error rolls it back.
        place.apply(patch)?;

        let updated = sqlx::query_as::<_, Place>(
            r#"UPDATE "places" SET
                "place_name" = $2, "city_name" = $3, "country_name" = $4, "state_name" = $5,
                "arrival_date" = $6, "experience_rating" = $7, "expense_rating" = $8
            WHERE "id" = $1
            RETURNING *"#,
        )
        .bind(place.id)
        .bind(&place.place_name)
        .bind(&place.city_name)
        .bind(&place.country_name)
        .bind(&place.state_name)
        .bind(place.arrival_date)
        .bind(place.experience_rating)
        .bind(place.expense_rating)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid, owner: Option<Uuid>) -> Result<Place, DatabaseError> {
        let sql = format!(r#"DELETE FROM "places" WHERE "id" = $1 AND {} RETURNING *"#, OWNER_SCOPE);
        sqlx::query_as::<_, Place>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(place_not_found)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let result = sqlx::query_as::<_, User>(
            r#"INSERT INTO "users" ("id", "email", "username", "password_hash")
            VALUES ($1, $2, $3, $4)
            RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(DatabaseError::Conflict(
                format!("Username '{}' is already taken", user.username),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM "users" WHERE "username" = $1"#)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM "users" WHERE "id" = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
