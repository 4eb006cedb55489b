//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error code.
///
/// # Error Categories
///
/// - **Infrastructure Errors**: database, password hashing, token signing (500, details hidden)
/// - **Authentication Errors**: missing/invalid access token, bad credentials, bad refresh token (401)
/// - **Authorization Errors**: resource belongs to another user (403)
/// - **Resource Errors**: requested expense not found (404)
/// - **Validation Errors**: invalid request data or unknown category (400), duplicate email (409)
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing or hash parsing failed.
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Access token could not be signed.
    #[error("Token encoding error: {0}")]
    TokenEncoding(#[source] jsonwebtoken::errors::Error),

    /// Access token is missing, malformed, expired, or has a bad signature.
    #[error("Unauthorized")]
    Unauthorized,

    /// Login failed. Unknown email and wrong password share this variant.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Refresh token is unknown, revoked, or expired.
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// The resource exists but is owned by another user.
    #[error("Forbidden")]
    Forbidden,

    /// Requested expense does not exist.
    #[error("Expense not found")]
    ExpenseNotFound,

    /// Referenced category does not exist.
    #[error("Category does not exist")]
    CategoryNotFound,

    /// Registration with an email that already has an account.
    #[error("Email already exists")]
    EmailTaken,

    /// Request body or parameters are invalid.
    ///
    /// The String contains details about what was invalid.
    #[error("Invalid request: {0}")]
    Validation(String),
}

/// Result alias used by services and handlers.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Database(_) | AppError::PasswordHash(_) | AppError::TokenEncoding(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            AppError::InvalidRefreshToken => (StatusCode::UNAUTHORIZED, "invalid_refresh_token"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::ExpenseNotFound => (StatusCode::NOT_FOUND, "expense_not_found"),
            AppError::CategoryNotFound => (StatusCode::BAD_REQUEST, "category_not_found"),
            AppError::EmailTaken => (StatusCode::CONFLICT, "email_taken"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// Internal errors are logged and replaced with a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            _ if status.is_server_error() => {
                tracing::error!(error = %self, "request failed with internal error");
                "An internal error occurred".to_string()
            }
            AppError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
