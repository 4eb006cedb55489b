//! User model and authentication request/response types.
//!
//! This module defines:
//! - `User`: Database entity representing a registered user
//! - `RegisterRequest`, `LoginRequest`, `RefreshRequest`: auth request bodies
//! - `TokenResponse`: access/refresh token pair returned by every auth endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a user record from the database.
///
/// # Database Table
///
/// Maps to the `users` table. Email is unique case-insensitively.
///
/// This struct is never serialized to clients; it carries the password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique identifier, also the `sub` claim of access tokens
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Login email, stored trimmed and lowercased
    pub email: String,

    /// Argon2id PHC string
    pub password_hash: String,

    /// Timestamp when the user registered
    pub created_at: DateTime<Utc>,
}

/// Request body for registering a new user.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Thanh",
///   "email": "thanh@example.com",
///   "password": "Thanh123@"
/// }
/// ```
///
/// # Validation
///
/// - `name`: Required, non-blank
/// - `email`: Required, must look like an email address
/// - `password`: 8-30 characters with a lowercase letter, an uppercase letter,
///   a digit, and one of `@$!%*?&`
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for logging in.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for exchanging or revoking a refresh token.
///
/// # JSON Example
///
/// ```json
/// {
///   "refresh_token": "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair returned by register, login, and refresh.
///
/// # JSON Example
///
/// ```json
/// {
///   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "refresh_token": "9f86d081884c7d659a2feaa0c55ad015...",
///   "token_type": "Bearer",
///   "expires_in": 3600
/// }
/// ```
///
/// The refresh token is single-use: exchanging it revokes it.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}
