//! Expense data models and API request/response types.
//!
//! This module defines:
//! - `Expense`: Database row for an expense joined with its category name
//! - `ExpenseRequest`: Request body for creating and updating expenses
//! - `ExpenseResponse`: Response body returned to clients
//! - `ExpenseListResponse`: One page of a (possibly date-windowed) listing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an expense record from the database.
///
/// # Database Table
///
/// Maps to the `expenses` table, joined with `categories` for `category_name`.
/// Each expense:
/// - Belongs to exactly one user (via `user_id`)
/// - Has a positive amount stored in cents
/// - Has the date the money was spent, separate from when the row was created
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Expense {
    /// Unique identifier for this expense
    pub id: Uuid,

    /// Owner of this expense
    ///
    /// Every query that reads or mutates an expense goes through an ownership
    /// check against the authenticated user.
    pub user_id: Uuid,

    pub category_id: i32,

    /// Name of the category, from the join
    pub category_name: String,

    /// Amount in cents, always > 0 (enforced by CHECK constraint)
    pub amount_cents: i64,

    pub description: Option<String>,

    /// When the money was spent
    pub expense_date: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing an expense.
///
/// # JSON Example
///
/// ```json
/// {
///   "amount_cents": 4599,
///   "description": "Weekly groceries",
///   "date": "2025-03-14T18:30:00Z",
///   "category_id": 1
/// }
/// ```
///
/// # Validation
///
/// - `amount_cents`: Must be greater than 0
/// - `category_id`: Must reference an existing category
/// - `date`: Must not be in the future
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRequest {
    pub amount_cents: i64,

    #[serde(default)]
    pub description: Option<String>,

    pub date: DateTime<Utc>,

    pub category_id: i32,
}

/// Response body for expense endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "amount_cents": 4599,
///   "description": "Weekly groceries",
///   "date": "2025-03-14T18:30:00Z",
///   "category_id": 1,
///   "category_name": "Groceries",
///   "created_at": "2025-03-14T18:31:02Z",
///   "updated_at": "2025-03-14T18:31:02Z"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseResponse {
    pub id: Uuid,
    pub amount_cents: i64,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub category_id: i32,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Convert database Expense to API ExpenseResponse.
///
/// This transformation removes the internal `user_id` field.
impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            amount_cents: expense.amount_cents,
            description: expense.description,
            date: expense.expense_date,
            category_id: expense.category_id,
            category_name: expense.category_name,
            created_at: expense.created_at,
            updated_at: expense.updated_at,
        }
    }
}

/// One page of expenses.
///
/// `total` counts every expense matching the listing's filter, not only the
/// ones on this page.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<ExpenseResponse>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}
