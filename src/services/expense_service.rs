//! Expense service - business logic for a user's expenses.
//!
//! This service handles:
//! - Validation of expense bodies and category references
//! - Ownership checks (404 for missing rows, 403 for other users' rows)
//! - Paginated, date-windowed listings
//!
//! Every function takes the authenticated user id from the access token; no
//! expense is ever read or written without checking it.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        expense::{Expense, ExpenseListResponse, ExpenseRequest, ExpenseResponse},
        pagination::Pagination,
    },
    services::{
        time_window::ExpenseWindow,
        validation::{normalize_description, validate_expense},
    },
};

/// Create an expense owned by `user_id`.
///
/// # Errors
///
/// - `Validation`: amount, category id, or date invalid
/// - `CategoryNotFound`: category id does not exist
pub async fn create_expense(
    pool: &DbPool,
    user_id: Uuid,
    request: ExpenseRequest,
) -> Result<Expense, AppError> {
    validate_expense(&request, Utc::now())?;
    ensure_category_exists(pool, request.category_id).await?;

    let expense = sqlx::query_as::<_, Expense>(
        r#"
        WITH inserted AS (
            INSERT INTO expenses (user_id, category_id, amount_cents, description, expense_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
        )
        SELECT i.id, i.user_id, i.category_id, c.name AS category_name, i.amount_cents,
               i.description, i.expense_date, i.created_at, i.updated_at
        FROM inserted i
        JOIN categories c ON c.id = i.category_id
        "#,
    )
    .bind(user_id)
    .bind(request.category_id)
    .bind(request.amount_cents)
    .bind(normalize_description(request.description))
    .bind(request.date)
    .fetch_one(pool)
    .await?;

    tracing::debug!(expense_id = %expense.id, %user_id, "expense created");

    Ok(expense)
}

/// Get one expense, checking ownership.
pub async fn get_expense(
    pool: &DbPool,
    user_id: Uuid,
    expense_id: Uuid,
) -> Result<Expense, AppError> {
    ensure_owner(pool, user_id, expense_id).await?;

    sqlx::query_as::<_, Expense>(
        r#"
        SELECT e.id, e.user_id, e.category_id, c.name AS category_name, e.amount_cents,
               e.description, e.expense_date, e.created_at, e.updated_at
        FROM expenses e
        JOIN categories c ON c.id = e.category_id
        WHERE e.id = $1
        "#,
    )
    .bind(expense_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::ExpenseNotFound)
}

/// Replace the fields of an expense, checking ownership first.
///
/// The ownership check runs before validation, so a user probing another
/// user's expense id gets 403 regardless of the body.
pub async fn update_expense(
    pool: &DbPool,
    user_id: Uuid,
    expense_id: Uuid,
    request: ExpenseRequest,
) -> Result<Expense, AppError> {
    ensure_owner(pool, user_id, expense_id).await?;
    validate_expense(&request, Utc::now())?;
    ensure_category_exists(pool, request.category_id).await?;

    // The user_id filter keeps the write scoped even if ownership changed
    // between the check and the update
    sqlx::query_as::<_, Expense>(
        r#"
        WITH updated AS (
            UPDATE expenses
            SET category_id = $3,
                amount_cents = $4,
                description = $5,
                expense_date = $6,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
        )
        SELECT u.id, u.user_id, u.category_id, c.name AS category_name, u.amount_cents,
               u.description, u.expense_date, u.created_at, u.updated_at
        FROM updated u
        JOIN categories c ON c.id = u.category_id
        "#,
    )
    .bind(expense_id)
    .bind(user_id)
    .bind(request.category_id)
    .bind(request.amount_cents)
    .bind(normalize_description(request.description))
    .bind(request.date)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::ExpenseNotFound)
}

/// Delete an expense, checking ownership first.
pub async fn delete_expense(
    pool: &DbPool,
    user_id: Uuid,
    expense_id: Uuid,
) -> Result<(), AppError> {
    ensure_owner(pool, user_id, expense_id).await?;

    let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND user_id = $2")
        .bind(expense_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::ExpenseNotFound);
    }

    tracing::debug!(%expense_id, %user_id, "expense deleted");

    Ok(())
}

/// List one page of the user's expenses inside `window`.
///
/// # Ordering
///
/// Newest spending date first, then newest created first.
pub async fn list_expenses(
    pool: &DbPool,
    user_id: Uuid,
    window: ExpenseWindow,
    pagination: Pagination,
) -> Result<ExpenseListResponse, AppError> {
    let (start, end, end_inclusive) = window.bounds();

    // $2/$3 are NULL for unbounded windows; $4 selects `<=` over `<` for the end bound
    let expenses = sqlx::query_as::<_, Expense>(
        r#"
        SELECT e.id, e.user_id, e.category_id, c.name AS category_name, e.amount_cents,
               e.description, e.expense_date, e.created_at, e.updated_at
        FROM expenses e
        JOIN categories c ON c.id = e.category_id
        WHERE e.user_id = $1
          AND ($2::timestamptz IS NULL OR e.expense_date >= $2)
          AND ($3::timestamptz IS NULL OR e.expense_date < $3 OR ($4 AND e.expense_date = $3))
        ORDER BY e.expense_date DESC, e.created_at DESC
        LIMIT $5 OFFSET $6
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .bind(end_inclusive)
    .bind(pagination.limit)
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM expenses e
        WHERE e.user_id = $1
          AND ($2::timestamptz IS NULL OR e.expense_date >= $2)
          AND ($3::timestamptz IS NULL OR e.expense_date < $3 OR ($4 AND e.expense_date = $3))
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .bind(end_inclusive)
    .fetch_one(pool)
    .await?;

    Ok(ExpenseListResponse {
        expenses: expenses.into_iter().map(ExpenseResponse::from).collect(),
        page: pagination.page,
        limit: pagination.limit,
        total,
    })
}

/// Ownership check for a single expense.
///
/// - No such expense: `ExpenseNotFound` (404)
/// - Owned by someone else: `Forbidden` (403)
pub async fn ensure_owner(pool: &DbPool, user_id: Uuid, expense_id: Uuid) -> Result<(), AppError> {
    let owner: Uuid = sqlx::query_scalar("SELECT user_id FROM expenses WHERE id = $1")
        .bind(expense_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::ExpenseNotFound)?;

    if owner != user_id {
        tracing::warn!(%expense_id, %user_id, "access to another user's expense denied");
        return Err(AppError::Forbidden);
    }

    Ok(())
}

async fn ensure_category_exists(pool: &DbPool, category_id: i32) -> Result<(), AppError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
        .bind(category_id)
        .fetch_one(pool)
        .await?;

    if !exists {
        return Err(AppError::CategoryNotFound);
    }

    Ok(())
}
