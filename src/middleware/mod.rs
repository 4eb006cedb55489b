//! HTTP middleware components.
//!
//! Middleware run before route handlers and can short-circuit requests
//! (e.g. reject unauthenticated ones).

/// Bearer token authentication middleware
pub mod auth;
