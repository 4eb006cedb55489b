//! Data models representing database entities and API payloads.
//!
//! This module contains all data structures that map to database tables,
//! plus the request and response bodies built from them.

/// Expense category model
pub mod category;
/// Expense model
pub mod expense;
/// Listing query parameters
pub mod pagination;
/// Refresh token model
pub mod refresh_token;
/// User and auth payload models
pub mod user;
