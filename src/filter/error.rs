use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("{field} must be a whole number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

impl FilterError {
    pub fn field(&self) -> &'static str {
        match self {
            FilterError::InvalidNumber { field, .. } => field,
        }
    }
}
