//! Page/limit query parameters shared by every listing endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 5;
pub const MAX_LIMIT: i64 = 100;

/// Query string for paginated listings: `?page=2&limit=10`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Query string for a custom date range listing.
///
/// Dates are RFC 3339 timestamps, e.g. `2025-01-01T00:00:00Z`.
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl DateRangeQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Validated page/limit pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    /// Apply defaults, reject pages below 1, and clamp `limit` to `1..=MAX_LIMIT`.
    ///
    /// Pages whose row offset does not fit in an `i64` are rejected too.
    pub fn from_query(query: &PageQuery) -> Result<Self, AppError> {
        let page = query.page.unwrap_or(DEFAULT_PAGE);
        if page < 1 {
            return Err(AppError::Validation("page must be at least 1".to_string()));
        }

        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        if (page - 1).checked_mul(limit).is_none() {
            return Err(AppError::Validation("page is too large".to_string()));
        }

        Ok(Self { page, limit })
    }

    /// Rows to skip. Cannot overflow for values built by `from_query`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}
