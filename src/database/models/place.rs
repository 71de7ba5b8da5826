use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::{optional_text, required_date, required_number, required_text, ValidationErrors};

const PLACE_NAME_REQUIRED: &str = "Please provide a place name";
const COUNTRY_NAME_REQUIRED: &str = "Please provide a country name";
const ARRIVAL_DATE_REQUIRED: &str = "Please provide an arrival date";
const EXPERIENCE_RATING_REQUIRED: &str = "Please provide an experience rating";
const EXPENSE_RATING_REQUIRED: &str = "Please provide an expense rating";

/// A stored place, as returned by every read and write path.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub place_name: String,
    pub city_name: String,
    pub country_name: String,
    pub state_name: String,
    pub arrival_date: NaiveDate,
    #[serde(serialize_with = "rating")]
    pub experience_rating: f64,
    #[serde(serialize_with = "rating")]
    pub expense_rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Uuid>,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

/// A place that passed validation and may be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlace {
    pub place_name: String,
    pub city_name: String,
    pub country_name: String,
    pub state_name: String,
    pub arrival_date: NaiveDate,
    pub experience_rating: f64,
    pub expense_rating: f64,
}

/// Raw place fields as submitted by a client.
///
/// `None` means the field was absent from the body; `Some(Value::Null)` means
/// it was sent as `null`. The distinction matters for patches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDraft {
    #[serde(default, deserialize_with = "present")]
    pub place_name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub city_name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub country_name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub state_name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub arrival_date: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub experience_rating: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub expense_rating: Option<Value>,
}

/// Partial update body. Absent fields keep their stored value.
pub type PlacePatch = PlaceDraft;

/// Whole ratings go out as integers (`5`, not `5.0`).
fn rating<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl PlaceDraft {
    /// Check every schema rule and collect all failures, not just the first.
    pub fn validate(&self) -> Result<NewPlace, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let place_name = errors.check(
            "placeName",
            required_text(self.place_name.as_ref(), "placeName", PLACE_NAME_REQUIRED),
        );
        let city_name = errors.check("cityName", optional_text(self.city_name.as_ref(), "cityName"));
        let country_name = errors.check(
            "countryName",
            required_text(self.country_name.as_ref(), "countryName", COUNTRY_NAME_REQUIRED),
        );
        let state_name = errors.check("stateName", optional_text(self.state_name.as_ref(), "stateName"));
        let arrival_date = errors.check(
            "arrivalDate",
            required_date(self.arrival_date.as_ref(), "arrivalDate", ARRIVAL_DATE_REQUIRED),
        );
        let experience_rating = errors.check(
            "experienceRating",
            required_number(self.experience_rating.as_ref(), "experienceRating", EXPERIENCE_RATING_REQUIRED),
        );
        let expense_rating = errors.check(
            "expenseRating",
            required_number(self.expense_rating.as_ref(), "expenseRating", EXPENSE_RATING_REQUIRED),
        );

        match (
            place_name,
            city_name,
            country_name,
            state_name,
            arrival_date,
            experience_rating,
            expense_rating,
        ) {
            (
                Some(place_name),
                Some(city_name),
                Some(country_name),
                Some(state_name),
                Some(arrival_date),
                Some(experience_rating),
                Some(expense_rating),
            ) if errors.is_empty() => Ok(NewPlace {
                place_name,
                city_name,
                country_name,
                state_name,
                arrival_date,
                experience_rating,
                expense_rating,
            }),
            _ => Err(errors),
        }
    }

    /// Fields present in `patch` replace the ones in `self`.
    pub fn overlay(mut self, patch: &PlacePatch) -> Self {
        fn take(slot: &mut Option<Value>, incoming: &Option<Value>) {
            if incoming.is_some() {
                *slot = incoming.clone();
            }
        }
        take(&mut self.place_name, &patch.place_name);
        take(&mut self.city_name, &patch.city_name);
        take(&mut self.country_name, &patch.country_name);
        take(&mut self.state_name, &patch.state_name);
        take(&mut self.arrival_date, &patch.arrival_date);
        take(&mut self.experience_rating, &patch.experience_rating);
        take(&mut self.expense_rating, &patch.expense_rating);
        self
    }
}

impl Place {
    pub fn new(id: Uuid, place: NewPlace, owner: Option<Uuid>) -> Self {
        Self {
            id,
            place_name: place.place_name,
            city_name: place.city_name,
            country_name: place.country_name,
            state_name: place.state_name,
            arrival_date: place.arrival_date,
            experience_rating: place.experience_rating,
            expense_rating: place.expense_rating,
            owner,
            created_at: Utc::now(),
        }
    }

    fn to_draft(&self) -> PlaceDraft {
        PlaceDraft {
            place_name: Some(json!(self.place_name)),
            city_name: Some(json!(self.city_name)),
            country_name: Some(json!(self.country_name)),
            state_name: Some(json!(self.state_name)),
            arrival_date: Some(json!(self.arrival_date.format("%Y-%m-%d").to_string())),
            experience_rating: Some(json!(self.experience_rating)),
            expense_rating: Some(json!(self.expense_rating)),
        }
    }

    /// Merge `patch` onto this record and re-validate the result.
    ///
    /// Leaves `self` untouched when validation fails. Id, owner and creation
    /// time are never patched.
    pub fn apply(&mut self, patch: &PlacePatch) -> Result<(), ValidationErrors> {
        let merged = self.to_draft().overlay(patch).validate()?;
        self.place_name = merged.place_name;
        self.city_name = merged.city_name;
        self.country_name = merged.country_name;
        self.state_name = merged.state_name;
        self.arrival_date = merged.arrival_date;
        self.experience_rating = merged.experience_rating;
        self.expense_rating = merged.expense_rating;
        Ok(())
    }
}
