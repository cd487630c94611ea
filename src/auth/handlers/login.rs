/**
 * Login Handler
 *
 * Verifies credentials and issues a fresh access/refresh token pair. The
 * response never distinguishes an unknown email from a wrong password.
 */
use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;

use crate::auth::handlers::types::{refresh_cookie, AuthResponse, LoginRequest, UserResponse};
use crate::auth::tokens::{issue_access_token, issue_refresh_token};
use crate::auth::users::{get_user_by_email, push_refresh_token};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Handle POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let email = request.email.trim().to_lowercase();

    let user = get_user_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::authentication("Invalid credentials"))?;

    let verified = bcrypt::verify(&request.password, &user.password_hash)?;
    if !verified {
        tracing::warn!("Failed login attempt for {}", email);
        return Err(ApiError::authentication("Invalid credentials"));
    }

    let access_token = issue_access_token(user.id)
        .map_err(|e| ApiError::internal(format!("Token issuance failed: {e}")))?;
    let refresh_token = issue_refresh_token(user.id)
        .map_err(|e| ApiError::internal(format!("Token issuance failed: {e}")))?;

    push_refresh_token(&state.db, user.id, &refresh_token).await?;

    tracing::info!("User logged in: {}", user.email);

    let jar = jar.add(refresh_cookie(refresh_token, &state.cookies));
    let response = AuthResponse {
        success: true,
        user: UserResponse::from(&user),
        access_token,
    };

    Ok((jar, Json(response)))
}
