use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::Place;

use super::error::FilterError;
use super::filter_where::FilterWhere;
use super::types::{FilterOp, FilterWhereInfo, SqlParam, SqlResult};

/// Raw query string of `GET /getplaces`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceQuery {
    pub experience_rating: Option<String>,
    pub expense_rating: Option<String>,
    pub place_name: Option<String>,
    pub city_name: Option<String>,
    pub country_name: Option<String>,
}

/// Typed predicate over places.
///
/// Each field is an independent constraint; `None` means unconstrained.
/// Ratings match exactly, text fields match as case-insensitive substrings,
/// and `owner` matches exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceFilter {
    pub experience_rating: Option<i32>,
    pub expense_rating: Option<i32>,
    pub place_name: Option<String>,
    pub city_name: Option<String>,
    pub country_name: Option<String>,
    pub owner: Option<Uuid>,
}

impl PlaceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse query parameters. Empty values impose no constraint; malformed
    /// numbers are rejected rather than silently matching nothing.
    pub fn from_query(query: &PlaceQuery) -> Result<Self, FilterError> {
        Ok(Self {
            experience_rating: parse_rating("experienceRating", query.experience_rating.as_deref())?,
            expense_rating: parse_rating("expenseRating", query.expense_rating.as_deref())?,
            place_name: non_empty(query.place_name.as_deref()),
            city_name: non_empty(query.city_name.as_deref()),
            country_name: non_empty(query.country_name.as_deref()),
            owner: None,
        })
    }

    pub fn experience_rating(mut self, rating: i32) -> Self {
        self.experience_rating = Some(rating);
        self
    }

    pub fn expense_rating(mut self, rating: i32) -> Self {
        self.expense_rating = Some(rating);
        self
    }

    pub fn place_name(mut self, text: impl Into<String>) -> Self {
        self.place_name = Some(text.into());
        self
    }

    pub fn city_name(mut self, text: impl Into<String>) -> Self {
        self.city_name = Some(text.into());
        self
    }

    pub fn country_name(mut self, text: impl Into<String>) -> Self {
        self.country_name = Some(text.into());
        self
    }

    /// Scope to one owner. `None` leaves the filter unscoped.
    pub fn owned_by(mut self, owner: Option<Uuid>) -> Self {
        self.owner = owner;
        self
    }

    pub fn conditions(&self) -> Vec<FilterWhereInfo> {
        let mut conditions = Vec::new();
        if let Some(rating) = self.experience_rating {
            conditions.push(FilterWhereInfo { column: "experience_rating", operator: FilterOp::Eq, data: SqlParam::Int(rating) });
        }
        if let Some(rating) = self.expense_rating {
            conditions.push(FilterWhereInfo { column: "expense_rating", operator: FilterOp::Eq, data: SqlParam::Int(rating) });
        }
        if let Some(text) = &self.place_name {
            conditions.push(FilterWhereInfo { column: "place_name", operator: FilterOp::ILike, data: SqlParam::Text(text.clone()) });
        }
        if let Some(text) = &self.city_name {
            conditions.push(FilterWhereInfo { column: "city_name", operator: FilterOp::ILike, data: SqlParam::Text(text.clone()) });
        }
        if let Some(text) = &self.country_name {
            conditions.push(FilterWhereInfo { column: "country_name", operator: FilterOp::ILike, data: SqlParam::Text(text.clone()) });
        }
        if let Some(owner) = self.owner {
            conditions.push(FilterWhereInfo { column: "owner", operator: FilterOp::Eq, data: SqlParam::Uuid(owner) });
        }
        conditions
    }

    /// In-process evaluation with the same semantics as [`PlaceFilter::to_sql`].
    pub fn matches(&self, place: &Place) -> bool {
        fn contains(haystack: &str, needle: &Option<String>) -> bool {
            needle
                .as_ref()
                .map_or(true, |n| haystack.to_lowercase().contains(&n.to_lowercase()))
        }

        self.experience_rating.map_or(true, |r| place.experience_rating == f64::from(r))
            && self.expense_rating.map_or(true, |r| place.expense_rating == f64::from(r))
            && contains(&place.place_name, &self.place_name)
            && contains(&place.city_name, &self.city_name)
            && contains(&place.country_name, &self.country_name)
            && self.owner.map_or(true, |o| place.owner == Some(o))
    }

    pub fn to_where_sql(&self) -> SqlResult {
        let (query, params) = FilterWhere::generate(&self.conditions(), 0);
        SqlResult { query, params }
    }

    pub fn to_sql(&self, table_name: &str) -> SqlResult {
        let where_result = self.to_where_sql();
        SqlResult {
            query: format!(
                "SELECT * FROM \"{}\" WHERE {} ORDER BY \"created_at\", \"id\"",
                table_name, where_result.query
            ),
            params: where_result.params,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn parse_rating(field: &'static str, value: Option<&str>) -> Result<Option<i32>, FilterError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<i32>()
            .map(Some)
            .map_err(|_| FilterError::InvalidNumber { field, value: raw.to_string() }),
    }
}
