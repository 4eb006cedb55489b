//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle database transactions, validation, and ownership checks.

pub mod auth_service;
pub mod expense_service;
pub mod time_window;
pub mod validation;
