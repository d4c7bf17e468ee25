//! Session authentication.
//!
//! Sessions are JWTs carried in an httpOnly cookie named `token`. The
//! [`AuthUser`] extractor validates the cookie and rejects the request
//! with 401 when it is missing, expired or tampered with.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::HttpError;
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Session lifetime in seconds (7 days).
const SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// JWT claims for a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Signing and verification keys derived from the configured secret.
pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl AuthKeys {
    /// Derive keys from a shared secret.
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a session token for a user.
    pub fn issue_token(&self, user_id: i64) -> Result<String, HttpError> {
        let claims = Claims {
            sub: user_id,
            exp: Utc::now().timestamp() + SESSION_TTL_SECS,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| HttpError::Internal(format!("Failed to sign session token: {e}")))
    }

    /// Validate a session token, returning the user id.
    pub fn validate_token(&self, token: &str) -> Result<i64, HttpError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| HttpError::Unauthorized("Invalid or expired session".to_string()))?;
        Ok(data.claims.sub)
    }
}

/// Build the session cookie carrying a freshly issued token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Build an expired session cookie, clearing any stored token.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build()
}

/// Authenticated user id, extracted from the session cookie.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(Cookie::value)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| HttpError::Unauthorized("Not authenticated".to_string()))?;

        let user_id = state.auth.validate_token(token)?;
        Ok(Self(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips() {
        let keys = AuthKeys::from_secret("test-secret");
        let token = keys.issue_token(42).unwrap();
        assert_eq!(keys.validate_token(&token).unwrap(), 42);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let keys = AuthKeys::from_secret("test-secret");
        let other = AuthKeys::from_secret("other-secret");
        let token = other.issue_token(42).unwrap();
        assert!(keys.validate_token(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let keys = AuthKeys::from_secret("test-secret");
        assert!(keys.validate_token("not-a-jwt").is_err());
    }

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = session_cookie("abc".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
