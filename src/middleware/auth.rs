/**
 * Authentication Middleware
 *
 * This module protects routes that require user authentication. It
 * extracts and verifies the bearer access token from the Authorization
 * header, loads the user row (so role and college data are available for
 * policy decisions), and attaches the result to request extensions.
 */
use axum::{
    extract::{FromRequestParts, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::tokens::verify_access_token;
use crate::auth::users::get_user_by_id;
use crate::error::ApiError;
use crate::policy::Role;
use crate::server::state::AppState;

/// Authenticated user data for the current request.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub college_name: Option<String>,
}

/// Authentication middleware
///
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies it as an access token (signature + expiry)
/// 3. Loads the user row so role/college are available downstream
/// 4. Attaches `AuthenticatedUser` to request extensions
///
/// Returns 401 when the token is missing, invalid, or names a deleted user.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            ApiError::authentication("Authentication required")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        ApiError::authentication("Authentication required")
    })?;

    let user_id = verify_access_token(token).map_err(|e| {
        tracing::warn!("Invalid access token: {}", e);
        ApiError::authentication("Invalid or expired token")
    })?;

    let user = get_user_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token subject no longer exists: {}", user_id);
            ApiError::authentication("Invalid or expired token")
        })?;

    let role = Role::parse(&user.role)
        .ok_or_else(|| ApiError::internal(format!("Unknown role in database: {}", user.role)))?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        name: user.name,
        email: user.email,
        role,
        college_name: user.college_name,
    });

    Ok(next.run(request).await)
}

/// Admin role gate for the `/admin` subtree.
///
/// Must be layered after `auth_middleware`; rejects non-admins with 403.
pub async fn require_admin_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| ApiError::authentication("Authentication required"))?;

    if user.role != Role::Admin {
        tracing::warn!("Non-admin {} hit an admin route", user.email);
        return Err(ApiError::authorization("Admin access required"));
    }

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user.
///
/// Usable as a handler parameter on any route behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::authentication("Authentication required")
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    #[tokio::test]
    async fn test_extractor_reads_extensions() {
        let (mut parts, _) = HttpRequest::builder()
            .uri("http://example.com")
            .body(())
            .unwrap()
            .into_parts();

        let user = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Student,
            college_name: Some("Tech U".to_string()),
        };
        parts.extensions.insert(user.clone());

        let extracted = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted.0.user_id, user.user_id);
        assert_eq!(extracted.0.role, Role::Student);
    }

    #[tokio::test]
    async fn test_extractor_rejects_missing_user() {
        let (mut parts, _) = HttpRequest::builder()
            .uri("http://example.com")
            .body(())
            .unwrap()
            .into_parts();

        let result = AuthUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::Authentication { .. })));
    }
}
