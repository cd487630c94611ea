/**
 * Refresh Handler
 *
 * Exchanges a valid refresh token for a new access token. The token is
 * accepted from the `refreshToken` cookie or, failing that, the request
 * body. Beyond the JWT checks, the token must still be present in the
 * user's stored list - a logged-out token is rejected even while it
 * remains cryptographically valid.
 */
use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;

use crate::auth::handlers::types::{RefreshRequest, RefreshResponse, REFRESH_COOKIE};
use crate::auth::tokens::{issue_access_token, verify_refresh_token};
use crate::auth::users::get_user_by_id;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Handle POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshRequest>>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| body.and_then(|Json(b)| b.refresh_token))
        .ok_or_else(|| ApiError::authentication("No refresh token provided"))?;

    let user_id = verify_refresh_token(&token).map_err(|e| {
        tracing::warn!("Refresh token verification failed: {}", e);
        ApiError::authentication("Invalid refresh token")
    })?;

    let user = get_user_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::authentication("Invalid refresh token"))?;

    // Stateful check: logout removes tokens from this list.
    if !user.refresh_tokens.iter().any(|t| t == &token) {
        tracing::warn!("Revoked refresh token presented for {}", user.email);
        return Err(ApiError::authentication("Invalid refresh token"));
    }

    let access_token = issue_access_token(user.id)
        .map_err(|e| ApiError::internal(format!("Token issuance failed: {e}")))?;

    Ok(Json(RefreshResponse {
        success: true,
        access_token,
    }))
}
