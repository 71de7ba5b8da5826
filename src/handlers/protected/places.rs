// handlers/protected/places.rs - place CRUD

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use uuid::Uuid;

use crate::database::models::{Place, PlaceDraft, PlacePatch};
use crate::database::PLACE_NOT_FOUND;
use crate::error::ApiError;
use crate::filter::{PlaceFilter, PlaceQuery};
use crate::middleware::{ApiResponse, ApiResult, Owner};
use crate::state::AppState;

/// A malformed id can never match a record, so it reads as not found.
fn parse_place_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(PLACE_NOT_FOUND))
}

/// GET /getplaces - list places matching the optional query filters
///
/// Query: `experienceRating`, `expenseRating` (exact), `placeName`,
/// `cityName`, `countryName` (case-insensitive substring).
/// Output: `{"places": [...]}`
pub async fn get_places(
    State(state): State<AppState>,
    Owner(owner): Owner,
    query: Result<Query<PlaceQuery>, QueryRejection>,
) -> ApiResult<Vec<Place>> {
    let Query(query) = query?;
    let filter = PlaceFilter::from_query(&query)?.owned_by(owner);
    let places = state.places().find_many(&filter).await?;
    Ok(ApiResponse::success("places", places))
}

/// GET /getplace/{id}
pub async fn get_place(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<String>,
) -> ApiResult<Place> {
    let id = parse_place_id(&id)?;
    let place = state.places().find_one(id, owner).await?;
    Ok(ApiResponse::success("place", place))
}

/// POST /addplace - validate and store a new place
///
/// Output: 201 `{"place": {...}}`, or 400 with `field_errors`.
pub async fn add_place(
    State(state): State<AppState>,
    Owner(owner): Owner,
    payload: Result<Json<PlaceDraft>, JsonRejection>,
) -> ApiResult<Place> {
    let Json(draft) = payload?;
    let new_place = draft.validate()?;
    let place = state.places().create(new_place, owner).await?;
    tracing::info!(id = %place.id, name = %place.place_name, "place added");
    Ok(ApiResponse::created("place", place))
}

/// PATCH /editplace/{id} - merge the body onto the stored place
///
/// The merged record is re-validated; on failure nothing is written.
pub async fn edit_place(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<String>,
    payload: Result<Json<PlacePatch>, JsonRejection>,
) -> ApiResult<Place> {
    let id = parse_place_id(&id)?;
    let Json(patch) = payload?;
    let place = state.places().update(id, &patch, owner).await?;
    tracing::info!(id = %place.id, "place updated");
    Ok(ApiResponse::success("place", place))
}

/// DELETE /deleteplace/{id}
///
/// Output: `{"placeToBeDeleted": {...}}` holding the removed record.
pub async fn delete_place(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<String>,
) -> ApiResult<Place> {
    let id = parse_place_id(&id)?;
    let place = state.places().delete(id, owner).await?;
    tracing::info!(id = %place.id, "place deleted");
    Ok(ApiResponse::success("placeToBeDeleted", place))
}
