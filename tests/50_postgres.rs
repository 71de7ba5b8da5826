//! Runs against a live Postgres. Needs `DATABASE_URL`:
//!
//!     DATABASE_URL=postgres://localhost/travelog_test cargo test --test 50_postgres -- --ignored

use anyhow::{Context, Result};
use serde_json::json;
use uuid::Uuid;

use travelog::config::AppConfig;
use travelog::database::models::{NewPlace, NewUser, PlaceDraft, PlacePatch};
use travelog::database::{DatabaseError, DatabaseManager, Storage};
use travelog::filter::PlaceFilter;

async fn live_storage() -> Result<Storage> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set for live tests")?;
    let config = AppConfig::development();
    let pool = DatabaseManager::connect(&url, &config.database).await?;
    DatabaseManager::migrate(&pool).await?;
    Ok(Storage::postgres(pool))
}

async fn new_owner(storage: &Storage) -> Result<Uuid> {
    let username = format!("pg-{}", Uuid::new_v4().simple());
    let user = storage
        .users
        .create(NewUser {
            email: format!("{}@example.com", username),
            username,
            password_hash: "unused".to_string(),
        })
        .await?;
    Ok(user.id)
}

fn louvre(experience: f64) -> Result<NewPlace> {
    let draft: PlaceDraft = serde_json::from_value(json!({
        "placeName": "Louvre",
        "cityName": "Paris",
        "countryName": "France",
        "arrivalDate": "2024-05-01",
        "experienceRating": experience,
        "expenseRating": 4
    }))?;
    Ok(draft.validate()?)
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn owner_scope_hides_other_users_places() -> Result<()> {
    let storage = live_storage().await?;
    let alice = new_owner(&storage).await?;
    let bob = new_owner(&storage).await?;

    let place = storage.places.create(louvre(4.5)?, Some(alice)).await?;
    assert_eq!(place.owner, Some(alice));
    assert_eq!(place.experience_rating, 4.5);

    let found = storage.places.find_one(place.id, Some(alice)).await?;
    assert_eq!(found.id, place.id);

    let err = storage.places.find_one(place.id, Some(bob)).await.unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound(_)));

    let patch: PlacePatch = serde_json::from_value(json!({ "cityName": "Lyon" }))?;
    let err = storage.places.update(place.id, &patch, Some(bob)).await.unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound(_)));

    let err = storage.places.delete(place.id, Some(bob)).await.unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound(_)));

    let listed = storage.places.find_many(&PlaceFilter::new().owned_by(Some(bob))).await?;
    assert!(listed.iter().all(|p| p.id != place.id));

    let listed = storage
        .places
        .find_many(&PlaceFilter::new().expense_rating(4).country_name("fran").owned_by(Some(alice)))
        .await?;
    assert_eq!(listed.len(), 1);

    // No owner means unscoped.
    assert_eq!(storage.places.find_one(place.id, None).await?.id, place.id);

    storage.places.delete(place.id, Some(alice)).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn invalid_patch_rolls_back() -> Result<()> {
    let storage = live_storage().await?;
    let owner = new_owner(&storage).await?;
    let place = storage.places.create(louvre(5.0)?, Some(owner)).await?;

    let patch: PlacePatch = serde_json::from_value(json!({ "placeName": "", "cityName": "Lyon" }))?;
    let err = storage.places.update(place.id, &patch, Some(owner)).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation(_)));
    assert_eq!(storage.places.find_one(place.id, Some(owner)).await?, place);

    let patch: PlacePatch = serde_json::from_value(json!({ "cityName": "Lyon" }))?;
    let updated = storage.places.update(place.id, &patch, Some(owner)).await?;
    assert_eq!(updated.city_name, "Lyon");
    assert_eq!(updated.place_name, "Louvre");

    storage.places.delete(place.id, Some(owner)).await?;
    Ok(())
}
