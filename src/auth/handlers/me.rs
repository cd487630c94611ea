/**
 * Current-User Handler
 *
 * Returns the authenticated user's profile. Re-reads the row so the
 * response reflects the latest profile data rather than token claims.
 */
use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::auth::handlers::types::UserResponse;
use crate::auth::users::get_user_by_id;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

/// Handle GET /auth/me
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Value>, ApiError> {
    let user = get_user_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(json!({
        "success": true,
        "user": UserResponse::from(&user),
    })))
}
