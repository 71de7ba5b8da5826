use serde::{Deserialize, Serialize};
use std::env;

/// Placeholder secret used by the development preset. Production refuses to boot with it.
pub const DEFAULT_SESSION_SECRET: &str = "travelog-development-session-secret";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// When false, places have no owner and every route is public.
    pub enabled: bool,
    pub session_secret: String,
    pub session_expiry_hours: i64,
    pub secure_cookie: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub bcrypt_cost: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SESSION_SECRET must be set to a non-default value in production")]
    InsecureSessionSecret,

    #[error("SESSION_SECRET cannot be empty")]
    EmptySessionSecret,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Auth overrides
        if let Ok(v) = env::var("AUTH_ENABLED") {
            self.auth.enabled = v.parse().unwrap_or(self.auth.enabled);
        }
        if let Ok(v) = env::var("SESSION_SECRET") {
            self.auth.session_secret = v;
        }
        if let Ok(v) = env::var("SESSION_EXPIRY_HOURS") {
            self.auth.session_expiry_hours = v.parse().unwrap_or(self.auth.session_expiry_hours);
        }
        if let Ok(v) = env::var("SESSION_SECURE_COOKIE") {
            self.auth.secure_cookie = v.parse().unwrap_or(self.auth.secure_cookie);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
            }
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Some(port) = env::var("TRAVELOG_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }

        self
    }

    /// Reject settings that must never reach a running server.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.session_secret.is_empty() {
            return Err(ConfigError::EmptySessionSecret);
        }
        if self.environment == Environment::Production
            && self.auth.session_secret == DEFAULT_SESSION_SECRET
        {
            return Err(ConfigError::InsecureSessionSecret);
        }
        Ok(())
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            auth: AuthConfig {
                enabled: false,
                session_secret: DEFAULT_SESSION_SECRET.to_string(),
                session_expiry_hours: 24 * 7, // 1 week
                secure_cookie: false,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                enable_cors: true,
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            auth: AuthConfig {
                enabled: true,
                session_secret: DEFAULT_SESSION_SECRET.to_string(),
                session_expiry_hours: 24,
                secure_cookie: true,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
                max_request_size_bytes: 512 * 1024,
            },
            security: SecurityConfig {
                enable_cors: true,
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            auth: AuthConfig {
                enabled: true,
                session_secret: DEFAULT_SESSION_SECRET.to_string(),
                session_expiry_hours: 4,
                secure_cookie: true,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: false,
                max_request_size_bytes: 256 * 1024,
            },
            security: SecurityConfig {
                enable_cors: false,
                bcrypt_cost: 12,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(!config.auth.enabled);
        assert_eq!(config.api.port, 3000);
        assert!(config.database.url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.auth.enabled);
        assert!(config.auth.secure_cookie);
        assert!(!config.api.enable_request_logging);
    }

    #[test]
    fn production_rejects_default_secret() {
        let config = AppConfig::production();
        assert!(matches!(config.validate(), Err(ConfigError::InsecureSessionSecret)));

        let mut config = AppConfig::production();
        config.auth.session_secret = "a-real-secret-from-the-vault".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_secret_is_rejected_everywhere() {
        let mut config = AppConfig::development();
        config.auth.session_secret.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptySessionSecret)));
    }
}
