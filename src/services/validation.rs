//! Request validation rules.
//!
//! Each validator returns the first failing rule as `AppError::Validation`
//! so the client gets one actionable message at a time.

use chrono::{DateTime, Utc};

use crate::{
    error::AppError,
    models::{expense::ExpenseRequest, user::RegisterRequest},
};

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 30;
pub const PASSWORD_SPECIALS: &str = "@$!%*?&";
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// Validate a registration request.
///
/// # Rules (checked in order)
///
/// - Email is required and must look like an address
/// - Password is required and must satisfy [`is_strong_password`]
/// - Name is required
pub fn validate_registration(request: &RegisterRequest) -> Result<(), AppError> {
    let email = request.email.trim();
    if email.is_empty() {
        return Err(invalid("Email is required"));
    }
    if !is_valid_email(email) {
        return Err(invalid("Invalid email"));
    }

    if request.password.is_empty() {
        return Err(invalid("Password is required"));
    }
    if !is_strong_password(&request.password) {
        return Err(invalid(
            "Password must be between 8 and 30 characters long and contain at least one \
             uppercase letter, one lowercase letter, one number, and one special character.",
        ));
    }

    if request.name.trim().is_empty() {
        return Err(invalid("Name is required"));
    }

    Ok(())
}

/// Validate an expense body against the current time.
///
/// # Rules
///
/// - Amount must be greater than 0
/// - Category is required (ids start at 1)
/// - Date cannot be later than `now`
/// - Description, if present, is at most 500 characters
pub fn validate_expense(request: &ExpenseRequest, now: DateTime<Utc>) -> Result<(), AppError> {
    if request.amount_cents <= 0 {
        return Err(invalid("Amount must be greater than 0"));
    }
    if request.category_id <= 0 {
        return Err(invalid("Category is required"));
    }
    if request.date > now {
        return Err(invalid("Date cannot be greater than current date"));
    }
    if let Some(ref description) = request.description {
        if description.chars().count() > DESCRIPTION_MAX_LEN {
            return Err(invalid("Description must be at most 500 characters"));
        }
    }
    Ok(())
}

/// Canonical form used for storing and looking up emails.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Minimal structural email check: `local@domain.tld`, no whitespace,
/// exactly one `@`, and a dotted domain without empty labels.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Password policy: 8-30 characters drawn from ASCII letters, digits, and
/// `@$!%*?&`, with at least one of each of lowercase, uppercase, digit, special.
pub fn is_strong_password(password: &str) -> bool {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return false;
    }

    let is_special = |c: char| PASSWORD_SPECIALS.contains(c);
    if !password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || is_special(c))
    {
        return false;
    }

    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(is_special)
}

/// Trim a description and drop it entirely when blank.
pub fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

fn invalid(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn register(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn message(result: Result<(), AppError>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_registration() {
        assert!(validate_registration(&register("Thanh", "Thanh123@gmail.com", "Thanh123@")).is_ok());
    }

    #[test]
    fn reports_first_failing_rule() {
        assert_eq!(message(validate_registration(&register("", "", ""))), "Email is required");
        assert_eq!(
            message(validate_registration(&register("", "a@b.co", ""))),
            "Password is required"
        );
        assert_eq!(
            message(validate_registration(&register("  ", "a@b.co", "Abcdef1!"))),
            "Name is required"
        );
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("user.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email("us er@example.com"));
    }

    #[test]
    fn password_policy() {
        assert!(is_strong_password("Thanh123@"));
        assert!(is_strong_password("Aa1$aaaa"));
        // too short / too long
        assert!(!is_strong_password("Aa1$aaa"));
        assert!(!is_strong_password(&format!("Aa1${}", "a".repeat(27))));
        // missing classes
        assert!(!is_strong_password("thanh123@"));
        assert!(!is_strong_password("THANH123@"));
        assert!(!is_strong_password("Thanhabc@"));
        assert!(!is_strong_password("Thanh1234"));
        // characters outside the allowed set
        assert!(!is_strong_password("Thanh123@#"));
        assert!(!is_strong_password("Thanh 123@"));
    }

    #[test]
    fn expense_rules() {
        let now = Utc::now();
        let ok = ExpenseRequest {
            amount_cents: 500,
            description: None,
            date: now - Duration::days(1),
            category_id: 1,
        };
        assert!(validate_expense(&ok, now).is_ok());

        let zero = ExpenseRequest { amount_cents: 0, ..ok.clone() };
        assert_eq!(message(validate_expense(&zero, now)), "Amount must be greater than 0");

        let no_category = ExpenseRequest { category_id: 0, ..ok.clone() };
        assert_eq!(message(validate_expense(&no_category, now)), "Category is required");

        let future = ExpenseRequest { date: now + Duration::minutes(5), ..ok.clone() };
        assert_eq!(
            message(validate_expense(&future, now)),
            "Date cannot be greater than current date"
        );

        let long = ExpenseRequest { description: Some("x".repeat(501)), ..ok };
        assert!(validate_expense(&long, now).is_err());
    }

    #[test]
    fn normalizers() {
        assert_eq!(normalize_email("  Thanh123@GMAIL.com "), "thanh123@gmail.com");
        assert_eq!(normalize_description(Some("  lunch ".into())), Some("lunch".into()));
        assert_eq!(normalize_description(Some("   ".into())), None);
        assert_eq!(normalize_description(None), None);
    }
}
