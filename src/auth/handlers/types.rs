/**
 * Authentication Request/Response Types
 *
 * Wire types for the auth endpoints plus the helpers that build the
 * `refreshToken` cookie. All JSON fields are camelCase.
 */
use axum_extra::extract::cookie::Cookie;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::tokens::REFRESH_TOKEN_DAYS;
use crate::auth::users::User;
use crate::server::config::CookieSettings;

/// Name of the HTTP-only cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Request body for POST /auth/signup
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to "student" when absent
    pub role: Option<String>,
    /// Required for students, ignored for admins
    pub college_name: Option<String>,
}

/// Request body for POST /auth/login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for POST /auth/refresh (token may also come via cookie)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Public view of a user. Never includes the password hash or the
/// refresh-token list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub college_name: Option<String>,
    pub profile_picture_url: Option<String>,
    pub bio: String,
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            college_name: user.college_name.clone(),
            profile_picture_url: user.profile_picture_url.clone(),
            bio: user.bio.clone(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Response body for signup and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub user: UserResponse,
    pub access_token: String,
}

/// Response body for POST /auth/refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub success: bool,
    pub access_token: String,
}

/// Generic `{success, message}` body (logout).
pub fn success_message(message: &str) -> Value {
    serde_json::json!({ "success": true, "message": message })
}

/// Build the HTTP-only refresh cookie, valid as long as the token itself.
pub fn refresh_cookie(token: String, settings: &CookieSettings) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .http_only(true)
        .secure(settings.secure)
        .same_site(settings.same_site)
        .path("/")
        .max_age(time::Duration::days(REFRESH_TOKEN_DAYS as i64))
        .build()
}

/// Build an immediately-expired refresh cookie to clear the client's copy.
pub fn expired_refresh_cookie(settings: &CookieSettings) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, ""))
        .http_only(true)
        .secure(settings.secure)
        .same_site(settings.same_site)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::SameSite;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            role: "student".to_string(),
            college_name: Some("Tech University".to_string()),
            profile_picture_url: None,
            bio: String::new(),
            refresh_tokens: vec!["secret-token".to_string()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_response_omits_secrets() {
        let response = UserResponse::from(&sample_user());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("refreshTokens").is_none());
        assert_eq!(json["collegeName"], "Tech University");
    }

    #[test]
    fn test_refresh_cookie_attributes() {
        let settings = CookieSettings {
            secure: true,
            same_site: SameSite::Strict,
        };
        let cookie = refresh_cookie("abc".to_string(), &settings);
        assert_eq!(cookie.name(), REFRESH_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    }

    #[test]
    fn test_expired_cookie_clears_value() {
        let cookie = expired_refresh_cookie(&CookieSettings::default());
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }

    #[test]
    fn test_signup_request_accepts_camel_case() {
        let body = r#"{"name":"Bob","email":"b@x.com","password":"secret1","collegeName":"Tech University"}"#;
        let request: SignupRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.college_name.as_deref(), Some("Tech University"));
        assert!(request.role.is_none());
    }
}
