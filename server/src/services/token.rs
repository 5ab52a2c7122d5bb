//! HS256 access tokens.
//!
//! DESIGN
//! ======
//! Tokens are self-contained: `sub` carries the user id, `nickname` lets the
//! SPA greet the user without a round trip, `exp` bounds the lifetime. There
//! is no server-side session table, so logout only clears the cookie.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use hmac::{Hmac, Mac};
use jwt::{SignWithKey, VerifyWithKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Claims embedded in every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub nickname: String,
    /// Expiry, unix seconds.
    pub exp: i64,
}

impl Claims {
    /// Parse `sub` back into a user id.
    #[must_use]
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signing key")]
    InvalidKey,
    #[error("malformed or forged token: {0}")]
    Invalid(#[from] jwt::Error),
    #[error("token expired")]
    Expired,
}

fn signing_key(secret: &str) -> Result<Hmac<Sha256>, TokenError> {
    Hmac::new_from_slice(secret.as_bytes()).map_err(|_| TokenError::InvalidKey)
}

/// Issue a token for `user_id` valid for `ttl` from now.
///
/// # Errors
///
/// Returns an error if signing fails.
pub fn create_access_token(secret: &str, user_id: Uuid, nickname: &str, ttl: Duration) -> Result<String, TokenError> {
    let claims = Claims {
        sub: user_id.to_string(),
        nickname: nickname.to_owned(),
        exp: (OffsetDateTime::now_utc() + ttl).unix_timestamp(),
    };
    let key = signing_key(secret)?;
    Ok(claims.sign_with_key(&key)?)
}

/// Check signature and expiry, returning the claims.
///
/// # Errors
///
/// Returns an error if the token is malformed, signed with another key, or expired.
pub fn verify_access_token(secret: &str, token: &str) -> Result<Claims, TokenError> {
    let key = signing_key(secret)?;
    let claims: Claims = token.verify_with_key(&key)?;
    if claims.exp <= OffsetDateTime::now_utc().unix_timestamp() {
        return Err(TokenError::Expired);
    }
    Ok(claims)
}
