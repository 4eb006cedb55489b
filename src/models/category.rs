//! Expense category model.
//!
//! Categories are a fixed list seeded by the migrations; clients read them to
//! learn which `category_id` values are valid.

use serde::Serialize;

/// Represents a category record from the `categories` table.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
}
