/**
 * Signup Handler
 *
 * Registers a new account, issues both tokens, and sets the refresh
 * cookie. All validation failures are collected and returned together.
 */
use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;

use crate::auth::handlers::types::{refresh_cookie, AuthResponse, SignupRequest, UserResponse};
use crate::auth::tokens::{issue_access_token, issue_refresh_token};
use crate::auth::users::{create_user, get_user_by_email, push_refresh_token};
use crate::error::ApiError;
use crate::policy::Role;
use crate::server::state::AppState;

const BCRYPT_COST: u32 = 12;

/// Validate a signup request, returning every failed check.
fn validate(request: &SignupRequest, role: Role) -> Vec<String> {
    let mut errors = Vec::new();

    let name_len = request.name.trim().chars().count();
    if !(2..=100).contains(&name_len) {
        errors.push("Name must be between 2 and 100 characters".to_string());
    }
    if !request.email.contains('@') {
        errors.push("Please provide a valid email".to_string());
    }
    if request.password.chars().count() < 6 {
        errors.push("Password must be at least 6 characters".to_string());
    }
    if role == Role::Student
        && request
            .college_name
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .is_empty()
    {
        errors.push("College name is required for students".to_string());
    }

    errors
}

/// Handle POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), ApiError> {
    let role = match request.role.as_deref() {
        None => Role::Student,
        Some(value) => Role::parse(value)
            .ok_or_else(|| ApiError::validation("Role must be student or admin"))?,
    };

    let errors = validate(&request, role);
    if !errors.is_empty() {
        return Err(ApiError::validation_all(errors));
    }

    let email = request.email.trim().to_lowercase();

    if get_user_by_email(&state.db, &email).await?.is_some() {
        return Err(ApiError::validation("User already exists"));
    }

    let password_hash = bcrypt::hash(&request.password, BCRYPT_COST)?;

    // Admins are not scoped to a college even when one is supplied.
    let college_name = match role {
        Role::Admin => None,
        Role::Student => request.college_name.map(|c| c.trim().to_string()),
    };

    // A concurrent signup can still hit the unique index after the precheck.
    let user = create_user(
        &state.db,
        request.name.trim().to_string(),
        email,
        password_hash,
        role.as_str(),
        college_name,
    )
    .await
    .map_err(|err| match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            ApiError::validation("User already exists")
        }
        _ => ApiError::Database(err),
    })?;

    let access_token = issue_access_token(user.id)
        .map_err(|e| ApiError::internal(format!("Token issuance failed: {e}")))?;
    let refresh_token = issue_refresh_token(user.id)
        .map_err(|e| ApiError::internal(format!("Token issuance failed: {e}")))?;

    push_refresh_token(&state.db, user.id, &refresh_token).await?;

    tracing::info!("New {} account registered: {}", user.role, user.email);

    let jar = jar.add(refresh_cookie(refresh_token, &state.cookies));
    let response = AuthResponse {
        success: true,
        user: UserResponse::from(&user),
        access_token,
    };

    Ok((StatusCode::CREATED, jar, Json(response)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str, college: Option<&str>) -> SignupRequest {
        SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: None,
            college_name: college.map(|c| c.to_string()),
        }
    }

    #[test]
    fn test_valid_student_request_passes() {
        let errors = validate(
            &request("Alice", "alice@example.com", "secret1", Some("Tech U")),
            Role::Student,
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_all_failures_are_collected() {
        let errors = validate(&request("A", "not-an-email", "short", None), Role::Student);
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_admin_does_not_need_college() {
        let errors = validate(
            &request("Admin", "admin@example.com", "secret1", None),
            Role::Admin,
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_whitespace_college_fails_for_students() {
        let errors = validate(
            &request("Alice", "alice@example.com", "secret1", Some("   ")),
            Role::Student,
        );
        assert_eq!(errors, vec!["College name is required for students"]);
    }
}
