//! Access token issuance and verification.
//!
//! Access tokens are HS256 JWTs carrying the user id in `sub`. They are
//! short-lived and stateless: nothing is stored server-side, so revocation
//! happens by letting them expire and refusing to rotate the refresh token.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Authenticated user id
    pub sub: Uuid,

    /// Display name at the time of issuance
    pub name: String,

    /// Unique token id, fresh for every issuance
    pub jti: Uuid,

    /// Issued at (seconds since epoch)
    pub iat: i64,

    /// Expiry (seconds since epoch)
    pub exp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// A freshly signed access token and its lifetime in seconds.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Signs and verifies access tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
    issuer: Option<String>,
}

impl JwtService {
    pub fn new(secret: &str, ttl_minutes: i64, issuer: Option<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(ref iss) = issuer {
            validation.set_issuer(&[iss]);
        }

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_seconds: ttl_minutes.saturating_mul(60),
            issuer,
        }
    }

    /// Lifetime of newly issued tokens, in seconds.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue an access token for a user, valid from now.
    pub fn issue(&self, user_id: Uuid, name: &str) -> Result<IssuedToken, AppError> {
        self.issue_at(user_id, name, Utc::now().timestamp())
    }

    /// Issue an access token as if signed at `issued_at` (seconds since epoch).
    pub fn issue_at(
        &self,
        user_id: Uuid,
        name: &str,
        issued_at: i64,
    ) -> Result<IssuedToken, AppError> {
        let claims = Claims {
            sub: user_id,
            name: name.to_string(),
            jti: Uuid::new_v4(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl_seconds),
            iss: self.issuer.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AppError::TokenEncoding)?;

        Ok(IssuedToken {
            token,
            expires_in: self.ttl_seconds,
        })
    }

    /// Verify signature, expiry, and (if configured) issuer.
    ///
    /// Every failure collapses into `AppError::Unauthorized`; the cause is
    /// only logged at debug level.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "access token rejected");
                AppError::Unauthorized
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn issued_token_verifies() {
        let service = JwtService::new(SECRET, 15, None);
        let user_id = Uuid::new_v4();

        let issued = service.issue(user_id, "Thanh").unwrap();
        assert_eq!(issued.expires_in, 15 * 60);

        let claims = service.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.name, "Thanh");
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn every_token_gets_a_fresh_jti() {
        let service = JwtService::new(SECRET, 15, None);
        let user_id = Uuid::new_v4();

        let a = service.verify(&service.issue(user_id, "a").unwrap().token).unwrap();
        let b = service.verify(&service.issue(user_id, "a").unwrap().token).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = JwtService::new(SECRET, 1, None);
        let two_hours_ago = Utc::now().timestamp() - 7200;

        let issued = service.issue_at(Uuid::new_v4(), "old", two_hours_ago).unwrap();
        assert!(matches!(service.verify(&issued.token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let signer = JwtService::new(SECRET, 15, None);
        let verifier = JwtService::new("another-secret-another-secret-xx", 15, None);

        let issued = signer.issue(Uuid::new_v4(), "x").unwrap();
        assert!(matches!(verifier.verify(&issued.token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn issuer_mismatch_is_rejected() {
        let signer = JwtService::new(SECRET, 15, Some("other-service".to_string()));
        let verifier = JwtService::new(SECRET, 15, Some("expense-tracker".to_string()));

        let issued = signer.issue(Uuid::new_v4(), "x").unwrap();
        assert!(verifier.verify(&issued.token).is_err());
        assert!(signer.verify(&issued.token).is_ok());
    }

    #[test]
    fn oversized_ttl_saturates() {
        let service = JwtService::new(SECRET, i64::MAX, None);
        assert_eq!(service.ttl_seconds(), i64::MAX);

        let issued = service.issue_at(Uuid::new_v4(), "x", 1_700_000_000).unwrap();
        assert_eq!(issued.expires_in, i64::MAX);
    }

    #[test]
    fn garbage_is_rejected() {
        let service = JwtService::new(SECRET, 15, None);
        assert!(matches!(service.verify("not.a.jwt"), Err(AppError::Unauthorized)));
    }
}
