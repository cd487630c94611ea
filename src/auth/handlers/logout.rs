/**
 * Logout Handler
 *
 * Revokes the presented refresh token (if any) and clears the cookie.
 * Always succeeds for an authenticated caller: logging out without a
 * refresh token still clears client state.
 */
use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;

use crate::auth::handlers::types::{expired_refresh_cookie, success_message, REFRESH_COOKIE};
use crate::auth::users::remove_refresh_token;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

/// Handle POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<serde_json::Value>), ApiError> {
    if let Some(cookie) = jar.get(REFRESH_COOKIE) {
        let token = cookie.value().to_string();
        if !token.is_empty() {
            remove_refresh_token(&state.db, user.user_id, &token).await?;
        }
    }

    tracing::info!("User logged out: {}", user.email);

    let jar = jar.add(expired_refresh_cookie(&state.cookies));
    Ok((jar, Json(success_message("Logged out successfully"))))
}
