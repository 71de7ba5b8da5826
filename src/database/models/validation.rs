use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

/// A single rejected field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Ordered list of field errors produced by explicit validation.
///
/// An empty list means the input passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Record the error side of `result` (if any) and hand back the value.
    pub fn check<T>(&mut self, field: &'static str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.push(field, message);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Field name to message, first message wins.
    pub fn field_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.field.to_string())
                .or_insert_with(|| error.message.clone());
        }
        map
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "validation failed: {}", parts.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Scalars are cast to text the way a loosely typed form submission expects.
fn cast_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn required_text(value: Option<&Value>, field: &str, missing: &str) -> Result<String, String> {
    match value {
        None | Some(Value::Null) => Err(missing.to_string()),
        Some(v) => match cast_text(v) {
            Some(s) if s.is_empty() => Err(missing.to_string()),
            Some(s) => Ok(s),
            None => Err(format!("{} must be text", field)),
        },
    }
}

pub(crate) fn optional_text(value: Option<&Value>, field: &str) -> Result<String, String> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(v) => cast_text(v).ok_or_else(|| format!("{} must be text", field)),
    }
}

/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp, or epoch milliseconds.
pub(crate) fn required_date(value: Option<&Value>, field: &str, missing: &str) -> Result<NaiveDate, String> {
    match value {
        None | Some(Value::Null) => Err(missing.to_string()),
        Some(Value::String(s)) if s.trim().is_empty() => Err(missing.to_string()),
        Some(Value::String(s)) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
                .ok_or_else(|| format!("{} must be a date (YYYY-MM-DD)", field))
        }
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| format!("{} must be a date (YYYY-MM-DD)", field)),
        Some(_) => Err(format!("{} must be a date (YYYY-MM-DD)", field)),
    }
}

/// Any finite number; numeric strings are accepted.
pub(crate) fn required_number(value: Option<&Value>, field: &str, missing: &str) -> Result<f64, String> {
    let not_a_number = || format!("{} must be a number", field);
    let parsed = match value {
        None | Some(Value::Null) => return Err(missing.to_string()),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Err(missing.to_string()),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    parsed.filter(|n| n.is_finite()).ok_or_else(not_a_number)
}
