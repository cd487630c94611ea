/**
 * Certification Handlers
 *
 * HTTP handlers for certification records. Creation is multipart (the
 * credential file is optional) and also publishes the paired feed post;
 * the two writes are independent and not rolled back on partial failure.
 */
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::certifications::db::{
    count_all, count_for_user, delete_certification_row, get_certification as get_certification_row,
    insert_certification, list_all, list_for_user, set_post_id, CertificationRow,
    NewCertification,
};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::pagination::{PageParams, Pagination};
use crate::policy::{require_admin, require_owner_or_admin, PostType};
use crate::posts::db::{delete_post_row, insert_post};
use crate::server::state::AppState;
use crate::storage::upload::{delete_stored_file, parse_multipart, store_upload};

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Query parameters for GET /certifications.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationListQuery {
    pub user_id: Option<Uuid>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Query parameters for GET /certifications/admin/all.
#[derive(Debug, Deserialize)]
pub struct AdminCertificationQuery {
    pub college: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Wire shape of a certification.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationResponse {
    pub id: String,
    pub user: CertificationOwnerResponse,
    pub title: String,
    pub organization: String,
    pub issue_date: String,
    pub credential_url: Option<String>,
    pub file_url: Option<String>,
    pub description: String,
    pub visibility: String,
    pub post_id: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationOwnerResponse {
    pub id: String,
    pub name: String,
    pub college_name: Option<String>,
}

impl From<&CertificationRow> for CertificationResponse {
    fn from(row: &CertificationRow) -> Self {
        Self {
            id: row.id.to_string(),
            user: CertificationOwnerResponse {
                id: row.user_id.to_string(),
                name: row.user_name.clone(),
                college_name: row.user_college_name.clone(),
            },
            title: row.title.clone(),
            organization: row.organization.clone(),
            issue_date: row.issue_date.to_string(),
            credential_url: row.credential_url.clone(),
            file_url: row.file_url.clone(),
            description: row.description.clone(),
            visibility: row.visibility.clone(),
            post_id: row.post_id.map(|id| id.to_string()),
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

/// Handle POST /certifications (multipart: title, organization, issueDate;
/// optional credentialUrl, description, file)
pub async fn create_certification(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let form = parse_multipart(multipart, "file").await?;

    let mut errors = Vec::new();
    if form.text("title").is_none() {
        errors.push("Title is required".to_string());
    }
    if form.text("organization").is_none() {
        errors.push("Organization is required".to_string());
    }
    let issue_date = match form.text("issueDate") {
        None => {
            errors.push("Issue date is required".to_string());
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push("Issue date must be a valid date (YYYY-MM-DD)".to_string());
                None
            }
        },
    };
    let description = form.text("description").unwrap_or("");
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        errors.push("Description must be at most 1000 characters".to_string());
    }
    if !errors.is_empty() {
        return Err(ApiError::validation_all(errors));
    }

    let title = form.text("title").unwrap_or_default().to_string();
    let organization = form.text("organization").unwrap_or_default().to_string();

    let file_url = match &form.file {
        Some(file) => Some(store_upload(&state.store, "certifications", file).await?),
        None => None,
    };

    let certification = insert_certification(
        &state.db,
        NewCertification {
            user_id: user.user_id,
            title: title.clone(),
            organization: organization.clone(),
            issue_date: issue_date.unwrap_or_default(),
            credential_url: form.text("credentialUrl").map(|v| v.to_string()),
            file_url,
            description: description.to_string(),
        },
    )
    .await?;

    // Publish the paired feed post and link it back. Independent writes:
    // a failure here leaves the certification standing without a post.
    let announcement = format!("Earned certification: {title} from {organization}");
    let post = insert_post(
        &state.db,
        user.user_id,
        &announcement,
        None,
        PostType::Certification.as_str(),
    )
    .await?;
    set_post_id(&state.db, certification.id, post.id).await?;

    let row = get_certification_row(&state.db, certification.id)
        .await?
        .ok_or_else(|| ApiError::internal("Certification vanished after creation"))?;

    tracing::info!("Certification {} created by {}", row.id, user.email);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "certification": CertificationResponse::from(&row),
        })),
    ))
}

/// Handle GET /certifications — the requester's list by default, another
/// user's via the `userId` query parameter.
pub async fn get_certifications(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<CertificationListQuery>,
) -> Result<Json<Value>, ApiError> {
    let owner = query.user_id.unwrap_or(user.user_id);
    let params = PageParams {
        page: query.page,
        limit: query.limit,
    };
    let limit = params.limit_or(DEFAULT_PAGE_SIZE);
    let offset = params.offset(DEFAULT_PAGE_SIZE);

    let rows = list_for_user(&state.db, owner, i64::from(limit), offset).await?;
    let total = count_for_user(&state.db, owner).await?;

    let certifications: Vec<CertificationResponse> =
        rows.iter().map(CertificationResponse::from).collect();

    Ok(Json(json!({
        "success": true,
        "certifications": certifications,
        "pagination": Pagination::new(params.page(), limit, total),
    })))
}

/// Handle GET /certifications/{id}
pub async fn get_certification(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let row = get_certification_row(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Certification not found"))?;

    Ok(Json(json!({
        "success": true,
        "certification": CertificationResponse::from(&row),
    })))
}

/// Handle DELETE /certifications/{id} (owner or admin) — also removes the
/// paired post and best-effort deletes the stored file.
pub async fn delete_certification(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let row = get_certification_row(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Certification not found"))?;

    require_owner_or_admin(&user, row.user_id)?;

    if let Some(file_url) = &row.file_url {
        delete_stored_file(&state.store, file_url).await;
    }
    if let Some(post_id) = row.post_id {
        delete_post_row(&state.db, post_id).await?;
    }
    delete_certification_row(&state.db, id).await?;

    tracing::info!("Certification {} deleted by {}", id, user.email);

    Ok(Json(json!({
        "success": true,
        "message": "Certification deleted successfully",
    })))
}

/// Handle GET /certifications/admin/all (admin) — every user's
/// certifications, optionally filtered by college.
pub async fn get_all_certifications(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<AdminCertificationQuery>,
) -> Result<Json<Value>, ApiError> {
    require_admin(&user)?;

    let params = PageParams {
        page: query.page,
        limit: query.limit,
    };
    let limit = params.limit_or(DEFAULT_PAGE_SIZE);
    let offset = params.offset(DEFAULT_PAGE_SIZE);
    let college = query.college.as_deref();

    let rows = list_all(&state.db, college, i64::from(limit), offset).await?;
    let total = count_all(&state.db, college).await?;

    let certifications: Vec<CertificationResponse> =
        rows.iter().map(CertificationResponse::from).collect();

    Ok(Json(json!({
        "success": true,
        "certifications": certifications,
        "pagination": Pagination::new(params.page(), limit, total),
    })))
}
