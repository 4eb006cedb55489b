//! Authentication HTTP handlers.
//!
//! This module implements the public auth endpoints:
//! - POST /api/v1/auth/register - Create account and sign in
//! - POST /api/v1/auth/login - Sign in with email and password
//! - POST /api/v1/auth/refresh - Exchange a refresh token for a new pair
//! - POST /api/v1/auth/logout - Revoke a refresh token

use crate::{
    app::AppState,
    error::AppError,
    models::user::{LoginRequest, RefreshRequest, RegisterRequest, TokenResponse},
    services::auth_service,
};
use axum::{Json, extract::State, http::StatusCode};

/// Register a new user.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Thanh",
///   "email": "thanh@example.com",
///   "password": "Thanh123@"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: token pair for the new user
/// - **Error (400)**: validation failed
/// - **Error (409)**: email already registered
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let tokens = auth_service::register(&state.pool, &state.tokens, request).await?;

    Ok((StatusCode::CREATED, Json(tokens)))
}

/// Sign in with email and password.
///
/// # Response
///
/// - **Success (200 OK)**: token pair
/// - **Error (401)**: unknown email or wrong password
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let tokens = auth_service::login(&state.pool, &state.tokens, request).await?;

    Ok(Json(tokens))
}

/// Exchange a refresh token.
///
/// The presented refresh token is revoked; use the one in the response next time.
///
/// # Response
///
/// - **Success (200 OK)**: new token pair
/// - **Error (401)**: token unknown, already used, revoked, or expired
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let tokens = auth_service::refresh(&state.pool, &state.tokens, request).await?;

    Ok(Json(tokens))
}

/// Revoke a refresh token. Always 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<StatusCode, AppError> {
    auth_service::logout(&state.pool, request).await?;

    Ok(StatusCode::NO_CONTENT)
}
