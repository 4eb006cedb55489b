//! Expense Tracker API
//!
//! A REST API for tracking personal expenses. Users register and log in to
//! receive a short-lived JWT access token plus a single-use refresh token,
//! then manage their own expenses and list them by date window.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries, embedded migrations)
//! - **Authentication**: HS256 access tokens, rotating refresh tokens stored as SHA-256 hashes
//! - **Passwords**: Argon2id
//! - **Format**: JSON requests/responses

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use app::{AppState, create_router};
pub use config::Config;
pub use error::{AppError, AppResult};
