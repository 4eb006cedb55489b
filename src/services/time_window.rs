//! Date windows for expense listings.
//!
//! All windows are computed in UTC from an explicit `now`, so the listing
//! handlers pass `Utc::now()` and the tests pass fixed instants.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};

use crate::error::AppError;

/// A filter on `expense_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseWindow {
    /// No date filter.
    All,

    /// `start <= date < end`
    HalfOpen {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// `start <= date <= end`
    Closed {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl ExpenseWindow {
    /// Bounds as SQL parameters: `(start, end, end_inclusive)`.
    pub fn bounds(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>, bool) {
        match *self {
            ExpenseWindow::All => (None, None, false),
            ExpenseWindow::HalfOpen { start, end } => (Some(start), Some(end), false),
            ExpenseWindow::Closed { start, end } => (Some(start), Some(end), true),
        }
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        match *self {
            ExpenseWindow::All => true,
            ExpenseWindow::HalfOpen { start, end } => start <= date && date < end,
            ExpenseWindow::Closed { start, end } => start <= date && date <= end,
        }
    }
}

/// The previous calendar week, Monday 00:00 to the following Monday 00:00.
///
/// Weeks start on Monday; on a Sunday the "previous week" is the one before
/// the week that Sunday closes.
pub fn past_week(now: DateTime<Utc>) -> ExpenseWindow {
    let today = now.date_naive();
    let days_since_monday = i64::from(today.weekday().num_days_from_monday());
    let this_monday = today - Duration::days(days_since_monday);
    let last_monday = this_monday - Duration::days(7);

    ExpenseWindow::HalfOpen {
        start: midnight(last_monday),
        end: midnight(this_monday),
    }
}

/// The previous calendar month, from its first day to the first day of the
/// current month. January maps to December of the previous year.
pub fn past_month(now: DateTime<Utc>) -> ExpenseWindow {
    let today = now.date_naive();
    let first_of_this_month = today - Duration::days(i64::from(today.day0()));
    let first_of_last_month = first_of_this_month - Months::new(1);

    ExpenseWindow::HalfOpen {
        start: midnight(first_of_last_month),
        end: midnight(first_of_this_month),
    }
}

/// From the same instant three months ago up to `now`, both inclusive.
///
/// Month arithmetic clamps to the end of shorter months (May 31 -> Feb 28/29).
pub fn last_three_months(now: DateTime<Utc>) -> ExpenseWindow {
    ExpenseWindow::Closed {
        start: now - Months::new(3),
        end: now,
    }
}

/// A caller-supplied range, both ends inclusive.
pub fn custom(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<ExpenseWindow, AppError> {
    if start > end {
        return Err(AppError::Validation(
            "start_date must not be after end_date".to_string(),
        ));
    }
    Ok(ExpenseWindow::Closed { start, end })
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn past_week_from_midweek() {
        // Friday 2025-03-14
        let window = past_week(at(2025, 3, 14, 15));
        assert_eq!(
            window,
            ExpenseWindow::HalfOpen {
                start: at(2025, 3, 3, 0),
                end: at(2025, 3, 10, 0),
            }
        );
    }

    #[test]
    fn past_week_on_sunday_and_monday() {
        // Sunday 2025-03-16 still belongs to the week of Monday 03-10
        let sunday = past_week(at(2025, 3, 16, 23));
        assert!(sunday.contains(at(2025, 3, 3, 0)));
        assert!(sunday.contains(at(2025, 3, 9, 23)));
        assert!(!sunday.contains(at(2025, 3, 10, 0)));

        // Monday 2025-03-17 moves the window forward
        let monday = past_week(at(2025, 3, 17, 0));
        assert!(monday.contains(at(2025, 3, 10, 0)));
        assert!(monday.contains(at(2025, 3, 16, 23)));
        assert!(!monday.contains(at(2025, 3, 17, 0)));
    }

    #[test]
    fn past_month_wraps_into_previous_year() {
        let window = past_month(at(2025, 1, 20, 9));
        assert_eq!(
            window,
            ExpenseWindow::HalfOpen {
                start: at(2024, 12, 1, 0),
                end: at(2025, 1, 1, 0),
            }
        );
    }

    #[test]
    fn past_month_covers_whole_short_month() {
        let window = past_month(at(2024, 3, 31, 12));
        assert!(window.contains(at(2024, 2, 29, 23)));
        assert!(!window.contains(at(2024, 3, 1, 0)));
        assert!(!window.contains(at(2024, 1, 31, 23)));
    }

    #[test]
    fn last_three_months_is_inclusive_and_clamped() {
        let now = at(2025, 5, 31, 10);
        let window = last_three_months(now);
        assert_eq!(
            window,
            ExpenseWindow::Closed {
                start: at(2025, 2, 28, 10),
                end: now,
            }
        );
        assert!(window.contains(now));
        assert!(window.contains(at(2025, 2, 28, 10)));
    }

    #[test]
    fn custom_range_validation() {
        let a = at(2025, 1, 1, 0);
        let b = at(2025, 2, 1, 0);
        assert_eq!(custom(a, b).unwrap().bounds(), (Some(a), Some(b), true));
        assert!(custom(a, a).is_ok());
        assert!(matches!(custom(b, a), Err(AppError::Validation(_))));
    }

    #[test]
    fn all_has_no_bounds() {
        assert_eq!(ExpenseWindow::All.bounds(), (None, None, false));
    }
}
