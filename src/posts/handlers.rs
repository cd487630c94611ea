/**
 * Post Handlers
 *
 * HTTP handlers for the feed endpoints. Responses embed the author profile
 * and present likes as a count plus the requester's own membership.
 *
 * Deleting a certification post also deletes the paired certification row
 * and its stored file, so neither side outlives the other.
 */
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::certifications::db as certifications_db;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::pagination::{PageParams, Pagination};
use crate::policy::{require_owner_or_admin, PostType};
use crate::posts::db::{
    count_posts, delete_post_row, get_post as get_post_row, insert_post, list_posts, set_likes,
    toggled_likes, PostRow,
};
use crate::server::state::AppState;
use crate::storage::upload::{delete_stored_file, parse_multipart, store_upload};

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_CONTENT_CHARS: usize = 5000;

/// Query parameters for GET /posts.
#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    pub college: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Author profile embedded in post responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: String,
    pub name: String,
    pub college_name: Option<String>,
    pub profile_picture_url: Option<String>,
}

/// Wire shape of a post.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub author: AuthorResponse,
    pub content: String,
    pub image_url: Option<String>,
    pub post_type: String,
    pub likes_count: usize,
    pub is_liked: bool,
    pub created_at: String,
}

impl PostResponse {
    /// Build the wire shape for a given viewer (`is_liked` is viewer-relative).
    pub fn for_viewer(row: &PostRow, viewer: Uuid) -> Self {
        Self {
            id: row.id.to_string(),
            author: AuthorResponse {
                id: row.author_id.to_string(),
                name: row.author_name.clone(),
                college_name: row.author_college_name.clone(),
                profile_picture_url: row.author_profile_picture_url.clone(),
            },
            content: row.content.clone(),
            image_url: row.image_url.clone(),
            post_type: row.post_type.clone(),
            likes_count: row.likes.len(),
            is_liked: row.likes.contains(&viewer),
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

/// Handle GET /posts
pub async fn get_posts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<PostListQuery>,
) -> Result<Json<Value>, ApiError> {
    let params = PageParams {
        page: query.page,
        limit: query.limit,
    };
    let limit = params.limit_or(DEFAULT_PAGE_SIZE);
    let offset = params.offset(DEFAULT_PAGE_SIZE);
    let college = query.college.as_deref();

    let rows = list_posts(&state.db, college, i64::from(limit), offset).await?;
    let total = count_posts(&state.db, college).await?;

    let posts: Vec<PostResponse> = rows
        .iter()
        .map(|row| PostResponse::for_viewer(row, user.user_id))
        .collect();

    Ok(Json(json!({
        "success": true,
        "posts": posts,
        "pagination": Pagination::new(params.page(), limit, total),
    })))
}

/// Handle POST /posts (multipart: content, optional type, optional image)
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let form = parse_multipart(multipart, "image").await?;

    let content = form
        .text("content")
        .ok_or_else(|| ApiError::validation("Content is required"))?;
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(ApiError::validation("Content must be at most 5000 characters"));
    }

    let post_type = match form.text("type") {
        None => PostType::Post,
        Some(value) => PostType::parse(value)
            .ok_or_else(|| ApiError::validation("Type must be post or certification"))?,
    };

    let image_url = match &form.file {
        Some(file) => Some(store_upload(&state.store, "posts", file).await?),
        None => None,
    };

    let row = insert_post(
        &state.db,
        user.user_id,
        content,
        image_url.as_deref(),
        post_type.as_str(),
    )
    .await?;

    tracing::info!("Post {} created by {}", row.id, user.email);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "post": PostResponse::for_viewer(&row, user.user_id),
        })),
    ))
}

/// Handle GET /posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let row = get_post_row(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    Ok(Json(json!({
        "success": true,
        "post": PostResponse::for_viewer(&row, user.user_id),
    })))
}

/// Handle POST /posts/{id}/like — toggles the requester's like.
pub async fn toggle_like(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let row = get_post_row(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let (likes, is_liked) = toggled_likes(row.likes, user.user_id);
    set_likes(&state.db, id, &likes).await?;

    Ok(Json(json!({
        "success": true,
        "isLiked": is_liked,
        "likesCount": likes.len(),
    })))
}

/// Handle DELETE /posts/{id} (owner or admin)
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let row = get_post_row(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    require_owner_or_admin(&user, row.author_id)?;

    // A certification post never outlives its certification.
    if row.post_type == PostType::Certification.as_str() {
        if let Some(certification) =
            certifications_db::get_certification_by_post_id(&state.db, id).await?
        {
            if let Some(file_url) = &certification.file_url {
                delete_stored_file(&state.store, file_url).await;
            }
            certifications_db::delete_certification_row(&state.db, certification.id).await?;
        }
    }

    if let Some(image_url) = &row.image_url {
        delete_stored_file(&state.store, image_url).await;
    }

    delete_post_row(&state.db, id).await?;

    tracing::info!("Post {} deleted by {}", id, user.email);

    Ok(Json(json!({
        "success": true,
        "message": "Post deleted successfully",
    })))
}
