use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::ValidationErrors;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A user ready to insert; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

impl User {
    pub fn new(id: Uuid, user: NewUser) -> Self {
        Self {
            id,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Body of `POST /signup`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Signup input that passed validation. The password is still plain text.
#[derive(Debug, Clone)]
pub struct Signup {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<Signup, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = errors.check(
            "email",
            self.email.as_deref().map(str::trim).map_or_else(
                || Err("Please provide an email".to_string()),
                |email| validate_email_format(email).map(|_| email.to_string()),
            ),
        );
        let username = errors.check(
            "username",
            self.username.as_deref().map(str::trim).map_or_else(
                || Err("Please provide a username".to_string()),
                |username| validate_username_format(username).map(|_| username.to_string()),
            ),
        );
        let password = errors.check(
            "password",
            match self.password.as_deref() {
                None | Some("") => Err("Please provide a password".to_string()),
                Some(p) if p.chars().count() < MIN_PASSWORD_LENGTH => Err(format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_LENGTH
                )),
                Some(p) => Ok(p.to_string()),
            },
        );

        match (email, username, password) {
            (Some(email), Some(username), Some(password)) if errors.is_empty() => Ok(Signup {
                email,
                username,
                password,
            }),
            _ => Err(errors),
        }
    }
}

pub fn validate_username_format(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }

    if username.len() < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }

    if username.len() > 50 {
        return Err("Username must be less than 50 characters".to_string());
    }

    // Allow alphanumeric, underscore, hyphen
    if !username.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return Err("Username can only contain letters, numbers, underscore, and hyphen".to_string());
    }

    if !username.chars().next().is_some_and(char::is_alphanumeric) {
        return Err("Username must start with a letter or number".to_string());
    }

    Ok(())
}

pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err("Invalid email format".to_string()),
    };

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err("Invalid email format".to_string());
    }

    if domain.starts_with('.') || domain.ends_with('.') {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}
