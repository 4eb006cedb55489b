//! Refresh token model.
//!
//! Refresh tokens are opaque random strings handed to the client once. Like the
//! credentials of any bearer scheme they are stored only as SHA-256 hashes.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Represents a refresh token record from the database.
///
/// # Database Table
///
/// Maps to the `refresh_tokens` table with columns:
/// - `id`: Unique identifier (UUID)
/// - `user_id`: Owner of the token
/// - `token_hash`: SHA-256 hex digest of the token handed to the client
/// - `expires_at`: After this instant the token cannot be exchanged
/// - `is_revoked`: Set when the token is exchanged or the user logs out
/// - `created_at`: When the token was issued
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,

    /// Revoked tokens are kept so reuse can be told apart from garbage.
    pub is_revoked: bool,

    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Whether this token may still be exchanged at `now`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked && self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(expires_at: DateTime<Utc>, is_revoked: bool) -> RefreshToken {
        RefreshToken {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token_hash: "ab".repeat(32),
            expires_at,
            is_revoked,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn usable_only_when_live_and_unrevoked() {
        let now = Utc::now();
        assert!(token(now + Duration::hours(1), false).is_usable_at(now));
        assert!(!token(now + Duration::hours(1), true).is_usable_at(now));
        assert!(!token(now - Duration::seconds(1), false).is_usable_at(now));
        assert!(!token(now, false).is_usable_at(now));
    }
}
