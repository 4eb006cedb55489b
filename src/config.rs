//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Minimum accepted length of `JWT_SECRET` in bytes (HS256 key size).
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Upper bound for `ACCESS_TOKEN_TTL_MINUTES` (one year).
pub const MAX_ACCESS_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 365;

/// Upper bound for `REFRESH_TOKEN_TTL_DAYS` (ten years).
pub const MAX_REFRESH_TOKEN_TTL_DAYS: i64 = 3650;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `JWT_SECRET` (required): HMAC key used to sign access tokens, at least 32 bytes
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `JWT_ISSUER` (optional): `iss` claim written to and required on access tokens
/// - `ACCESS_TOKEN_TTL_MINUTES` (optional): access token lifetime, defaults to 60
/// - `REFRESH_TOKEN_TTL_DAYS` (optional): refresh token lifetime, defaults to 1
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    pub jwt_secret: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default)]
    pub jwt_issuer: Option<String>,

    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_minutes: i64,

    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: i64,
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Env(#[from] envy::Error),

    #[error("JWT_SECRET must be at least 32 bytes")]
    WeakJwtSecret,

    #[error("{0} must be positive")]
    NonPositive(&'static str),

    #[error("{0} must not exceed {1}")]
    TooLarge(&'static str, i64),
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

fn default_access_ttl() -> i64 {
    60
}

fn default_refresh_ttl() -> i64 {
    1
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL, JWT_SECRET)
    /// - Environment variable values cannot be parsed into expected types
    /// - The JWT secret is too short or a TTL is out of range
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: jwt_secret -> JWT_SECRET
        let config = envy::from_env::<Config>()?;
        config.validate()?;

        Ok(config)
    }

    /// Check values that deserialize fine but are unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::WeakJwtSecret);
        }
        check_ttl(
            "ACCESS_TOKEN_TTL_MINUTES",
            self.access_token_ttl_minutes,
            MAX_ACCESS_TOKEN_TTL_MINUTES,
        )?;
        check_ttl(
            "REFRESH_TOKEN_TTL_DAYS",
            self.refresh_token_ttl_days,
            MAX_REFRESH_TOKEN_TTL_DAYS,
        )
    }
}

fn check_ttl(name: &'static str, value: i64, max: i64) -> Result<(), ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NonPositive(name));
    }
    if value > max {
        return Err(ConfigError::TooLarge(name, max));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database_url: "postgres://localhost/expenses".to_string(),
            jwt_secret: "x".repeat(MIN_JWT_SECRET_LEN),
            server_port: default_port(),
            database_max_connections: default_max_connections(),
            jwt_issuer: None,
            access_token_ttl_minutes: default_access_ttl(),
            refresh_token_ttl_days: default_refresh_ttl(),
        }
    }

    #[test]
    fn accepts_defaults() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn rejects_short_secret() {
        let mut cfg = config();
        cfg.jwt_secret = "too-short".to_string();
        assert!(matches!(cfg.validate(), Err(ConfigError::WeakJwtSecret)));
    }

    #[test]
    fn rejects_zero_ttl() {
        let mut cfg = config();
        cfg.refresh_token_ttl_days = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive("REFRESH_TOKEN_TTL_DAYS"))
        ));
    }

    #[test]
    fn rejects_oversized_ttls() {
        let mut cfg = config();
        cfg.access_token_ttl_minutes = i64::MAX;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::TooLarge("ACCESS_TOKEN_TTL_MINUTES", MAX_ACCESS_TOKEN_TTL_MINUTES))
        ));

        let mut cfg = config();
        cfg.refresh_token_ttl_days = i64::MAX / 2;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::TooLarge("REFRESH_TOKEN_TTL_DAYS", _))
        ));

        let mut cfg = config();
        cfg.access_token_ttl_minutes = MAX_ACCESS_TOKEN_TTL_MINUTES;
        cfg.refresh_token_ttl_days = MAX_REFRESH_TOKEN_TTL_DAYS;
        assert!(cfg.validate().is_ok());
    }
}
