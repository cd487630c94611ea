/**
 * Access and Refresh Tokens
 *
 * JWT issuance and verification for the two token kinds. Both are HS256
 * tokens signed with `JWT_SECRET`; a `token_use` claim separates them so an
 * access token can never be replayed as a refresh token or vice versa.
 *
 * Verification here is purely stateless (signature + expiry + use). Refresh
 * callers must additionally confirm the token is still present in the
 * user's stored list - revocation is stateful and lives in `users.rs`.
 */
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

/// Access token lifetime in minutes.
pub const ACCESS_TOKEN_MINUTES: u64 = 15;

/// Refresh token lifetime in days.
pub const REFRESH_TOKEN_DAYS: u64 = 7;

const ACCESS_USE: &str = "access";
const REFRESH_USE: &str = "refresh";

/// JWT claims carried by both token kinds.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Token kind: "access" or "refresh"
    pub token_use: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Token verification failures. All map to 401 at the API boundary.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("wrong token type")]
    WrongUse,
    #[error("invalid user id in token")]
    InvalidSubject,
}

/// Get JWT secret from environment
fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|err| {
        tracing::warn!("Missing JWT_SECRET ({}); using development default", err);
        "educonnect-dev-secret-change-in-production".to_string()
    })
}

fn issue_token(
    user_id: Uuid,
    token_use: &str,
    lifetime_secs: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();

    let claims = Claims {
        sub: user_id.to_string(),
        token_use: token_use.to_string(),
        exp: now + lifetime_secs,
        iat: now,
    };

    let secret = jwt_secret();
    let key = EncodingKey::from_secret(secret.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Issue a short-lived access token for API calls.
pub fn issue_access_token(user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
    issue_token(user_id, ACCESS_USE, ACCESS_TOKEN_MINUTES * 60)
}

/// Issue a 7-day refresh token. The caller is responsible for appending it
/// to the user's stored token list.
pub fn issue_refresh_token(user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
    issue_token(user_id, REFRESH_USE, REFRESH_TOKEN_DAYS * 24 * 60 * 60)
}

fn verify_token(token: &str, expected_use: &str) -> Result<Uuid, TokenError> {
    let secret = jwt_secret();
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let data = decode::<Claims>(token, &key, &validation)?;
    if data.claims.token_use != expected_use {
        return Err(TokenError::WrongUse);
    }
    Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::InvalidSubject)
}

/// Verify an access token (signature + expiry + use) and return the user id.
pub fn verify_access_token(token: &str) -> Result<Uuid, TokenError> {
    verify_token(token, ACCESS_USE)
}

/// Verify a refresh token (signature + expiry + use) and return the user id.
/// Callers must still confirm the token is in the user's stored list.
pub fn verify_refresh_token(token: &str) -> Result<Uuid, TokenError> {
    verify_token(token, REFRESH_USE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_access_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = issue_access_token(user_id).unwrap();
        assert!(!token.is_empty());
        assert_eq!(verify_access_token(&token).unwrap(), user_id);
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = issue_refresh_token(user_id).unwrap();
        assert_eq!(verify_refresh_token(&token).unwrap(), user_id);
    }

    #[test]
    fn test_token_use_is_enforced() {
        let user_id = Uuid::new_v4();
        let access = issue_access_token(user_id).unwrap();
        let refresh = issue_refresh_token(user_id).unwrap();

        assert_matches!(verify_refresh_token(&access), Err(TokenError::WrongUse));
        assert_matches!(verify_access_token(&refresh), Err(TokenError::WrongUse));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_access_token("not.a.token").is_err());
        assert!(verify_refresh_token("").is_err());
    }

    #[test]
    fn test_expiry_exceeds_issuance() {
        let token = issue_refresh_token(Uuid::new_v4()).unwrap();
        let key = DecodingKey::from_secret(jwt_secret().as_ref());
        let claims = decode::<Claims>(&token, &key, &Validation::default())
            .unwrap()
            .claims;
        assert_eq!(claims.exp - claims.iat, REFRESH_TOKEN_DAYS * 24 * 60 * 60);
    }
}
