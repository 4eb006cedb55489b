//! Credential primitives: access-token signing and password hashing.
//!
//! Neither module touches the database; the token lifecycle that ties them to
//! stored users and refresh tokens lives in `services::auth_service`.

/// HS256 access tokens
pub mod jwt;
/// Argon2id password hashes
pub mod password;
