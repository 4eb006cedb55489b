//! Auth service - registration, login, and the refresh token lifecycle.
//!
//! This service handles:
//! - Password hashing and verification for registration/login
//! - Issuing an access token + refresh token pair
//! - Refresh token rotation (each refresh token is single-use)
//! - Refresh token revocation on logout
//!
//! # Refresh Token Storage
//!
//! The client receives 32 random bytes, hex encoded. Only the SHA-256 hash of
//! that string is stored, the same way a bearer API key would be stored.

use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use sqlx::PgExecutor;

use crate::{
    auth::{
        jwt::JwtService,
        password::{hash_password, verify_password},
    },
    db::DbPool,
    error::AppError,
    models::{
        refresh_token::RefreshToken,
        user::{LoginRequest, RefreshRequest, RegisterRequest, TokenResponse, User},
    },
    services::validation::{normalize_email, validate_registration},
};

/// Everything needed to mint a token pair.
#[derive(Clone)]
pub struct TokenConfig {
    pub jwt: JwtService,
    pub refresh_token_ttl: Duration,
}

impl TokenConfig {
    pub fn new(jwt: JwtService, refresh_token_ttl_days: i64) -> Self {
        Self {
            jwt,
            refresh_token_ttl: Duration::days(refresh_token_ttl_days),
        }
    }
}

/// Register a new user and sign them in.
///
/// # Process
///
/// 1. Validate name, email, and password policy
/// 2. Reject emails that already have an account (case-insensitive)
/// 3. Hash password and insert user
/// 4. Issue token pair (same database transaction as the insert)
///
/// # Errors
///
/// - `Validation`: a field failed validation
/// - `EmailTaken`: email already registered
pub async fn register(
    pool: &DbPool,
    tokens: &TokenConfig,
    request: RegisterRequest,
) -> Result<TokenResponse, AppError> {
    validate_registration(&request)?;

    let email = normalize_email(&request.email);

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = $1)")
            .bind(&email)
            .fetch_one(pool)
            .await?;

    if exists {
        return Err(AppError::EmailTaken);
    }

    let password_hash = hash_password(&request.password)?;

    let mut tx = pool.begin().await?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, password_hash, created_at
        "#,
    )
    .bind(request.name.trim())
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&mut *tx)
    .await
    // Lost a race with a concurrent registration of the same email
    .map_err(|e| {
        if e.as_database_error()
            .is_some_and(|db| db.is_unique_violation())
        {
            AppError::EmailTaken
        } else {
            AppError::Database(e)
        }
    })?;

    let response = issue_token_pair(&mut *tx, tokens, &user).await?;

    tx.commit().await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(response)
}

/// Authenticate with email and password.
///
/// Unknown email and wrong password return the same error so the endpoint
/// cannot be used to discover registered emails.
pub async fn login(
    pool: &DbPool,
    tokens: &TokenConfig,
    request: LoginRequest,
) -> Result<TokenResponse, AppError> {
    let email = normalize_email(&request.email);

    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, created_at FROM users WHERE LOWER(email) = $1",
    )
    .bind(&email)
    .fetch_optional(pool)
    .await?;

    let Some(user) = user else {
        tracing::debug!("login attempt for unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(&request.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "login attempt with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let response = issue_token_pair(pool, tokens, &user).await?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(response)
}

/// Exchange a refresh token for a new token pair.
///
/// # Process
///
/// 1. Start database transaction
/// 2. Lock the stored token row (`FOR UPDATE`)
/// 3. Reject unknown, revoked, or expired tokens
/// 4. Revoke the presented token
/// 5. Issue and store a new pair, then commit
///
/// The row lock means two concurrent exchanges of the same token serialize:
/// the second one sees `is_revoked = true` and fails.
pub async fn refresh(
    pool: &DbPool,
    tokens: &TokenConfig,
    request: RefreshRequest,
) -> Result<TokenResponse, AppError> {
    let token_hash = hash_refresh_token(&request.refresh_token);

    let mut tx = pool.begin().await?;

    let stored = sqlx::query_as::<_, RefreshToken>(
        r#"
        SELECT id, user_id, token_hash, expires_at, is_revoked, created_at
        FROM refresh_tokens
        WHERE token_hash = $1
        FOR UPDATE
        "#,
    )
    .bind(&token_hash)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::InvalidRefreshToken)?;

    if !stored.is_usable_at(Utc::now()) {
        if stored.is_revoked {
            tracing::warn!(user_id = %stored.user_id, "revoked refresh token presented");
        }
        tx.rollback().await?;
        return Err(AppError::InvalidRefreshToken);
    }

    sqlx::query("UPDATE refresh_tokens SET is_revoked = true WHERE id = $1")
        .bind(stored.id)
        .execute(&mut *tx)
        .await?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1",
    )
    .bind(stored.user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::InvalidRefreshToken)?;

    let response = issue_token_pair(&mut *tx, tokens, &user).await?;

    tx.commit().await?;

    tracing::debug!(user_id = %user.id, "refresh token rotated");

    Ok(response)
}

/// Revoke a refresh token.
///
/// Unknown or already revoked tokens are not an error; logging out twice is fine.
pub async fn logout(pool: &DbPool, request: RefreshRequest) -> Result<(), AppError> {
    let token_hash = hash_refresh_token(&request.refresh_token);

    let revoked = sqlx::query(
        "UPDATE refresh_tokens SET is_revoked = true WHERE token_hash = $1 AND is_revoked = false",
    )
    .bind(&token_hash)
    .execute(pool)
    .await?
    .rows_affected();

    if revoked > 0 {
        tracing::info!("refresh token revoked on logout");
    }

    Ok(())
}

/// Sign an access token and store a new refresh token for `user`.
async fn issue_token_pair<'c>(
    executor: impl PgExecutor<'c>,
    tokens: &TokenConfig,
    user: &User,
) -> Result<TokenResponse, AppError> {
    let access = tokens.jwt.issue(user.id, &user.name)?;

    let refresh_token = generate_refresh_token();
    let expires_at = Utc::now() + tokens.refresh_token_ttl;

    sqlx::query(
        r#"
        INSERT INTO refresh_tokens (user_id, token_hash, expires_at)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(user.id)
    .bind(hash_refresh_token(&refresh_token))
    .bind(expires_at)
    .execute(executor)
    .await?;

    Ok(TokenResponse::bearer(
        access.token,
        refresh_token,
        access.expires_in,
    ))
}

/// Generate cryptographically secure refresh token.
///
/// # Output
///
/// 64 hex characters (32 random bytes)
pub fn generate_refresh_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

/// SHA-256 hex digest of a refresh token, as stored in `refresh_tokens.token_hash`.
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_tokens_are_random_hex() {
        let a = generate_refresh_token();
        let b = generate_refresh_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn hash_is_stable_sha256() {
        // sha256("abc")
        assert_eq!(
            hash_refresh_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_ne!(hash_refresh_token("abc"), hash_refresh_token("abd"));
    }

    #[test]
    fn token_config_converts_days() {
        let config = TokenConfig::new(
            JwtService::new("0123456789abcdef0123456789abcdef", 60, None),
            7,
        );
        assert_eq!(config.refresh_token_ttl, Duration::days(7));
        assert_eq!(config.jwt.ttl_seconds(), 3600);
    }
}
