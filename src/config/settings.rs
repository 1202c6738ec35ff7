//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MAX_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH, ROLE_USER,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    /// Role name assigned to users created through registration
    pub default_user_role: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("default_user_role", &self.default_user_role)
            .finish()
    }
}

impl Config {
    /// Build a configuration with defaults for everything except the
    /// database URL and JWT secret.
    ///
    /// # Errors
    /// Returns an internal error if the secret is shorter than
    /// `MIN_JWT_SECRET_LENGTH`.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url: database_url.into(),
            jwt_secret,
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            default_user_role: ROLE_USER.to_string(),
        })
    }

    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// In release builds `JWT_SECRET` is mandatory; debug builds fall back
    /// to an insecure development secret.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let mut config = Self::new(database_url, jwt_secret)?;

        if let Ok(raw) = env::var("JWT_EXPIRATION_HOURS") {
            let hours = raw.trim().parse().map_err(|_| {
                AppError::internal(format!("JWT_EXPIRATION_HOURS is not a number: {}", raw))
            })?;
            config.set_jwt_expiration_hours(hours)?;
        }
        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }
        if let Some(port) = env::var("SERVER_PORT").ok().and_then(|v| v.parse().ok()) {
            config.server_port = port;
        }
        if let Ok(role) = env::var("DEFAULT_USER_ROLE") {
            config.default_user_role = role;
        }

        Ok(config)
    }

    /// Token lifetime in hours, always within `1..=MAX_JWT_EXPIRATION_HOURS`.
    pub fn jwt_expiration_hours(&self) -> i64 {
        self.jwt_expiration_hours
    }

    /// Set the token lifetime.
    ///
    /// # Errors
    /// Returns an internal error unless `hours` is between 1 and
    /// `MAX_JWT_EXPIRATION_HOURS`.
    pub fn set_jwt_expiration_hours(&mut self, hours: i64) -> AppResult<()> {
        if !(1..=MAX_JWT_EXPIRATION_HOURS).contains(&hours) {
            return Err(AppError::internal(format!(
                "JWT_EXPIRATION_HOURS must be between 1 and {}, got {}",
                MAX_JWT_EXPIRATION_HOURS, hours
            )));
        }
        self.jwt_expiration_hours = hours;
        Ok(())
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
