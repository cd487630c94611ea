/**
 * Material Handlers
 *
 * HTTP handlers for study materials. Write operations are admin-only;
 * reads are scoped by the policy layer so students only ever see their
 * own college's materials.
 */
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::materials::db::{
    count_materials, delete_material_row, get_material as get_material_row, insert_material,
    list_materials, update_material_row, MaterialRow, NewMaterial,
};
use crate::middleware::auth::AuthUser;
use crate::pagination::{PageParams, Pagination};
use crate::policy::{require_admin, scope_college, Role};
use crate::server::state::AppState;
use crate::storage::upload::{
    delete_stored_file, file_extension, parse_multipart, store_upload, FileType,
};

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_TITLE_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Query parameters for GET /materials.
#[derive(Debug, Deserialize)]
pub struct MaterialListQuery {
    pub college: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Request body for PUT /materials/{id}; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateMaterialRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Wire shape of a material.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialResponse {
    pub id: String,
    pub uploaded_by: MaterialUploaderResponse,
    pub college_name: String,
    pub title: String,
    pub description: String,
    pub file_url: String,
    pub file_type: String,
    pub file_size: i64,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUploaderResponse {
    pub id: String,
    pub name: String,
}

impl From<&MaterialRow> for MaterialResponse {
    fn from(row: &MaterialRow) -> Self {
        Self {
            id: row.id.to_string(),
            uploaded_by: MaterialUploaderResponse {
                id: row.uploaded_by_admin_id.to_string(),
                name: row.uploader_name.clone(),
            },
            college_name: row.college_name.clone(),
            title: row.title.clone(),
            description: row.description.clone(),
            file_url: row.file_url.clone(),
            file_type: row.file_type.clone(),
            file_size: row.file_size,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

/// Handle POST /materials (admin; multipart: title, collegeName, optional
/// description, required file)
pub async fn upload_material(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_admin(&user)?;

    let form = parse_multipart(multipart, "file").await?;

    let mut errors = Vec::new();
    match form.text("title") {
        None => errors.push("Title is required".to_string()),
        Some(title) if title.chars().count() > MAX_TITLE_CHARS => {
            errors.push("Title must be at most 200 characters".to_string());
        }
        Some(_) => {}
    }
    if form.text("collegeName").is_none() {
        errors.push("College name is required".to_string());
    }
    let description = form.text("description").unwrap_or("");
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        errors.push("Description must be at most 2000 characters".to_string());
    }
    if form.file.is_none() {
        errors.push("File is required".to_string());
    }
    if !errors.is_empty() {
        return Err(ApiError::validation_all(errors));
    }

    let title = form.text("title").unwrap_or_default().to_string();
    let college_name = form.text("collegeName").unwrap_or_default().to_string();
    let file = form.file.as_ref().ok_or_else(|| ApiError::validation("File is required"))?;

    let namespace = format!("materials/{college_name}");
    let file_url = store_upload(&state.store, &namespace, file).await?;

    let file_type = file_extension(&file.filename)
        .map(|ext| FileType::classify(&ext))
        .unwrap_or(FileType::Other);

    let row = insert_material(
        &state.db,
        NewMaterial {
            uploaded_by_admin_id: user.user_id,
            college_name,
            title,
            description: description.to_string(),
            file_url,
            file_type: file_type.as_str().to_string(),
            file_size: file.size(),
        },
    )
    .await?;

    tracing::info!("Material {} uploaded by {}", row.id, user.email);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "material": MaterialResponse::from(&row),
        })),
    ))
}

/// Handle GET /materials — college scope comes from policy, so a student's
/// `college` query parameter is ignored in favor of their own college.
pub async fn get_materials(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<MaterialListQuery>,
) -> Result<Json<Value>, ApiError> {
    let params = PageParams {
        page: query.page,
        limit: query.limit,
    };
    let limit = params.limit_or(DEFAULT_PAGE_SIZE);
    let offset = params.offset(DEFAULT_PAGE_SIZE);

    let college = scope_college(&user, query.college);

    let rows = list_materials(&state.db, college.as_deref(), i64::from(limit), offset).await?;
    let total = count_materials(&state.db, college.as_deref()).await?;

    let materials: Vec<MaterialResponse> = rows.iter().map(MaterialResponse::from).collect();

    Ok(Json(json!({
        "success": true,
        "materials": materials,
        "pagination": Pagination::new(params.page(), limit, total),
    })))
}

/// Handle GET /materials/{id} — students may only read within their college.
pub async fn get_material(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let row = get_material_row(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Material not found"))?;

    if user.role == Role::Student && user.college_name.as_deref() != Some(row.college_name.as_str())
    {
        return Err(ApiError::authorization("Access denied"));
    }

    Ok(Json(json!({
        "success": true,
        "material": MaterialResponse::from(&row),
    })))
}

/// Handle PUT /materials/{id} (admin; partial update)
pub async fn update_material(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMaterialRequest>,
) -> Result<Json<Value>, ApiError> {
    require_admin(&user)?;

    let title = request.title.as_deref().map(str::trim);
    if let Some(title) = title {
        if title.is_empty() || title.chars().count() > MAX_TITLE_CHARS {
            return Err(ApiError::validation("Title must be between 1 and 200 characters"));
        }
    }
    let description = request.description.as_deref().map(str::trim);
    if let Some(description) = description {
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(ApiError::validation("Description must be at most 2000 characters"));
        }
    }

    let row = update_material_row(&state.db, id, title, description)
        .await?
        .ok_or_else(|| ApiError::not_found("Material not found"))?;

    Ok(Json(json!({
        "success": true,
        "material": MaterialResponse::from(&row),
    })))
}

/// Handle DELETE /materials/{id} (admin) — best-effort storage cleanup.
pub async fn delete_material(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    require_admin(&user)?;

    let row = get_material_row(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Material not found"))?;

    delete_stored_file(&state.store, &row.file_url).await;
    delete_material_row(&state.db, id).await?;

    tracing::info!("Material {} deleted by {}", id, user.email);

    Ok(Json(json!({
        "success": true,
        "message": "Material deleted successfully",
    })))
}
