/**
 * Admin Handlers
 *
 * HTTP handlers for the `/admin` subtree. The admin role gate is applied
 * as route-layer middleware in the router, so these handlers never see a
 * non-admin caller.
 */
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::admin::colleges::{
    delete_college_row, get_college_row, insert_college, list_colleges, update_college_row,
    CollegeFields, CollegeRow,
};
use crate::auth::handlers::types::UserResponse;
use crate::auth::users::{count_users, delete_user, get_user_by_id, list_users};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::pagination::{PageParams, Pagination};
use crate::policy::forbid_self_delete;
use crate::server::state::AppState;

const DEFAULT_USER_PAGE_SIZE: u32 = 20;

/// Request body for college creation and update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeRequest {
    pub name: String,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub website: Option<String>,
}

/// Query parameters for GET /admin/users.
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
    pub college: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Wire shape of a college.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeResponse {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    pub created_by: CollegeCreatorResponse,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeCreatorResponse {
    pub id: String,
    pub name: String,
}

impl From<&CollegeRow> for CollegeResponse {
    fn from(row: &CollegeRow) -> Self {
        Self {
            id: row.id.to_string(),
            name: row.name.clone(),
            address: row.address.clone(),
            contact_email: row.contact_email.clone(),
            website: row.website.clone(),
            created_by: CollegeCreatorResponse {
                id: row.created_by_admin_id.to_string(),
                name: row.creator_name.clone(),
            },
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

fn validated_fields(request: CollegeRequest) -> Result<CollegeFields, ApiError> {
    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::validation("College name is required"));
    }
    Ok(CollegeFields {
        name,
        address: request.address.filter(|v| !v.trim().is_empty()),
        contact_email: request.contact_email.filter(|v| !v.trim().is_empty()),
        website: request.website.filter(|v| !v.trim().is_empty()),
    })
}

/// Translate a unique-violation on the college name into a 400.
fn map_college_error(err: sqlx::Error) -> ApiError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            ApiError::validation("College already exists")
        }
        _ => ApiError::Database(err),
    }
}

/// Handle POST /admin/colleges
pub async fn create_college(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CollegeRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let fields = validated_fields(request)?;

    let row = insert_college(&state.db, user.user_id, fields)
        .await
        .map_err(map_college_error)?;

    tracing::info!("College '{}' created by {}", row.name, user.email);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "college": CollegeResponse::from(&row),
        })),
    ))
}

/// Handle GET /admin/colleges
pub async fn get_colleges(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let rows = list_colleges(&state.db).await?;
    let colleges: Vec<CollegeResponse> = rows.iter().map(CollegeResponse::from).collect();

    Ok(Json(json!({
        "success": true,
        "colleges": colleges,
    })))
}

/// Handle GET /admin/colleges/{id}
pub async fn get_college(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let row = get_college_row(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("College not found"))?;

    Ok(Json(json!({
        "success": true,
        "college": CollegeResponse::from(&row),
    })))
}

/// Handle PUT /admin/colleges/{id}
pub async fn update_college(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CollegeRequest>,
) -> Result<Json<Value>, ApiError> {
    let fields = validated_fields(request)?;

    let row = update_college_row(&state.db, id, fields)
        .await
        .map_err(map_college_error)?
        .ok_or_else(|| ApiError::not_found("College not found"))?;

    Ok(Json(json!({
        "success": true,
        "college": CollegeResponse::from(&row),
    })))
}

/// Handle DELETE /admin/colleges/{id}
pub async fn delete_college(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    if !delete_college_row(&state.db, id).await? {
        return Err(ApiError::not_found("College not found"));
    }

    tracing::info!("College {} deleted by {}", id, user.email);

    Ok(Json(json!({
        "success": true,
        "message": "College deleted successfully",
    })))
}

/// Handle GET /admin/users — filterable by role and college. Password
/// hashes and refresh tokens never reach the response type.
pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Value>, ApiError> {
    let params = PageParams {
        page: query.page,
        limit: query.limit,
    };
    let limit = params.limit_or(DEFAULT_USER_PAGE_SIZE);
    let offset = params.offset(DEFAULT_USER_PAGE_SIZE);
    let role = query.role.as_deref();
    let college = query.college.as_deref();

    let rows = list_users(&state.db, role, college, i64::from(limit), offset).await?;
    let total = count_users(&state.db, role, college).await?;

    let users: Vec<UserResponse> = rows.iter().map(UserResponse::from).collect();

    Ok(Json(json!({
        "success": true,
        "users": users,
        "pagination": Pagination::new(params.page(), limit, total),
    })))
}

/// Handle DELETE /admin/users/{id} — admins cannot delete themselves.
pub async fn delete_user_account(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    forbid_self_delete(&user, id)?;

    if get_user_by_id(&state.db, id).await?.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    delete_user(&state.db, id).await?;

    tracing::info!("User {} deleted by admin {}", id, user.email);

    Ok(Json(json!({
        "success": true,
        "message": "User deleted successfully",
    })))
}
