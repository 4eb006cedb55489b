//! Category listing handler.

use crate::{db::DbPool, error::AppError, models::category::Category};
use axum::{Json, extract::State};

/// List every expense category.
///
/// # Endpoint
///
/// `GET /api/v1/categories`
///
/// # Response (200 OK)
///
/// ```json
/// [
///   { "id": 1, "name": "Groceries" },
///   { "id": 2, "name": "Leisure" }
/// ]
/// ```
pub async fn list_categories(
    State(pool): State<DbPool>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&pool)
            .await?;

    Ok(Json(categories))
}
