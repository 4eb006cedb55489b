//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Delegates to a service for validation and database work
//! 3. Returns HTTP response (JSON, status code)

/// Register, login, refresh, logout
pub mod auth;
/// Category listing
pub mod categories;
/// Expense CRUD and listings
pub mod expenses;
/// Service health
pub mod health;
