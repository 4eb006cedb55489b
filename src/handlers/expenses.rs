//! Expense HTTP handlers.
//!
//! This module implements the expense API endpoints:
//! - POST /api/v1/expenses - Create expense
//! - GET /api/v1/expenses - List all expenses (paginated)
//! - GET /api/v1/expenses/past-week - Previous calendar week
//! - GET /api/v1/expenses/past-month - Previous calendar month
//! - GET /api/v1/expenses/last-3-months - Last three months up to now
//! - GET /api/v1/expenses/custom - Caller-supplied date range
//! - GET/PUT/DELETE /api/v1/expenses/{id} - Single expense, owner only

use crate::{
    db::DbPool,
    error::AppError,
    middleware::auth::AuthContext,
    models::{
        expense::{ExpenseListResponse, ExpenseRequest, ExpenseResponse},
        pagination::{DateRangeQuery, PageQuery, Pagination},
    },
    services::{
        expense_service,
        time_window::{self, ExpenseWindow},
    },
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

/// Create a new expense for the authenticated user.
///
/// # Request Body
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
/// # Response
///
/// - **Success (201 Created)**: the created expense
/// - **Error (400)**: validation failed or unknown category
pub async fn create_expense(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<ExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseResponse>), AppError> {
    let expense = expense_service::create_expense(&pool, auth.user_id, request).await?;

    Ok((StatusCode::CREATED, Json(expense.into())))
}

/// Get an expense by ID.
///
/// # Response
///
/// - **Success (200 OK)**
/// - **Error (403)**: expense belongs to another user
/// - **Error (404)**: no such expense
pub async fn get_expense(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(expense_id): Path<Uuid>,
) -> Result<Json<ExpenseResponse>, AppError> {
    let expense = expense_service::get_expense(&pool, auth.user_id, expense_id).await?;

    Ok(Json(expense.into()))
}

/// Replace an expense's amount, description, date, and category.
///
/// Same body and error codes as create, plus 403/404 for ownership.
pub async fn update_expense(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(expense_id): Path<Uuid>,
    Json(request): Json<ExpenseRequest>,
) -> Result<Json<ExpenseResponse>, AppError> {
    let expense =
        expense_service::update_expense(&pool, auth.user_id, expense_id, request).await?;

    Ok(Json(expense.into()))
}

/// Delete an expense. Returns 204 No Content on success.
pub async fn delete_expense(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(expense_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    expense_service::delete_expense(&pool, auth.user_id, expense_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List all expenses, newest first.
///
/// # Query Parameters
///
/// - `page` (default 1)
/// - `limit` (default 5, max 100)
///
/// # Response
///
/// ```json
/// {
///   "expenses": [ ... ],
///   "page": 1,
///   "limit": 5,
///   "total": 42
/// }
/// ```
pub async fn list_expenses(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ExpenseListResponse>, AppError> {
    list_in_window(&pool, &auth, ExpenseWindow::All, &query).await
}

/// List expenses from the previous calendar week (Monday to Sunday).
pub async fn list_past_week(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ExpenseListResponse>, AppError> {
    list_in_window(&pool, &auth, time_window::past_week(Utc::now()), &query).await
}

/// List expenses from the previous calendar month.
pub async fn list_past_month(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ExpenseListResponse>, AppError> {
    list_in_window(&pool, &auth, time_window::past_month(Utc::now()), &query).await
}

/// List expenses from the last three months up to now.
pub async fn list_last_three_months(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ExpenseListResponse>, AppError> {
    list_in_window(&pool, &auth, time_window::last_three_months(Utc::now()), &query).await
}

/// List expenses between `start_date` and `end_date`, both inclusive.
///
/// # Query Parameters
///
/// - `start_date`, `end_date`: RFC 3339 timestamps (required)
/// - `page`, `limit`: as for the other listings
pub async fn list_custom_range(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ExpenseListResponse>, AppError> {
    let window = time_window::custom(query.start_date, query.end_date)?;

    list_in_window(&pool, &auth, window, &query.page_query()).await
}

async fn list_in_window(
    pool: &DbPool,
    auth: &AuthContext,
    window: ExpenseWindow,
    query: &PageQuery,
) -> Result<Json<ExpenseListResponse>, AppError> {
    let pagination = Pagination::from_query(query)?;
    let page = expense_service::list_expenses(pool, auth.user_id, window, pagination).await?;

    Ok(Json(page))
}
