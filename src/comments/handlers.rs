/**
 * Comment Handlers
 *
 * HTTP handlers for threaded comments. Reads return the nested forest;
 * deletion authorizes against the comment author (or admin) and removes
 * the whole subtree in one bulk delete.
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::comments::db::{
    delete_comments, get_comment, insert_comment, list_for_post, CommentRow,
};
use crate::comments::tree::{build_forest, collect_subtree, CommentNode};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::policy::require_owner_or_admin;
use crate::posts::db::get_post;
use crate::server::state::AppState;

const MAX_CONTENT_CHARS: usize = 2000;

/// Request body for POST /comments/{postId}
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    pub parent_comment_id: Option<Uuid>,
}

/// Wire shape of a comment, replies nested.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub parent_comment_id: Option<String>,
    pub author: CommentAuthorResponse,
    pub content: String,
    pub created_at: String,
    pub replies: Vec<CommentResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthorResponse {
    pub id: String,
    pub name: String,
    pub profile_picture_url: Option<String>,
}

impl CommentResponse {
    fn from_row(row: &CommentRow, replies: Vec<CommentResponse>) -> Self {
        Self {
            id: row.id.to_string(),
            post_id: row.post_id.to_string(),
            parent_comment_id: row.parent_comment_id.map(|id| id.to_string()),
            author: CommentAuthorResponse {
                id: row.author_id.to_string(),
                name: row.author_name.clone(),
                profile_picture_url: row.author_profile_picture_url.clone(),
            },
            content: row.content.clone(),
            created_at: row.created_at.to_rfc3339(),
            replies,
        }
    }

    /// Convert a forest of nodes without recursion: children first, then
    /// parents fold over the already-converted replies.
    fn from_forest(forest: Vec<CommentNode>) -> Vec<CommentResponse> {
        forest.into_iter().map(Self::from_node).collect()
    }

    fn from_node(node: CommentNode) -> Self {
        let mut stack = vec![(node, Vec::new())];
        loop {
            let (current, _) = stack.last_mut().expect("stack never empty");
            if let Some(child) = current.replies.pop() {
                stack.push((child, Vec::new()));
                continue;
            }

            let (current, mut converted) = stack.pop().expect("stack never empty");
            // replies were popped back-to-front
            converted.reverse();
            let response = Self::from_row(&current.row, converted);

            match stack.last_mut() {
                Some((_, siblings)) => siblings.push(response),
                None => return response,
            }
        }
    }
}

/// Handle GET /comments/{postId}
pub async fn get_comments(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let rows = list_for_post(&state.db, post_id).await?;
    let forest = build_forest(rows);

    Ok(Json(json!({
        "success": true,
        "comments": CommentResponse::from_forest(forest),
    })))
}

/// Handle POST /comments/{postId}
pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let content = request.content.trim();
    if content.is_empty() {
        return Err(ApiError::validation("Content is required"));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(ApiError::validation("Content must be at most 2000 characters"));
    }

    if get_post(&state.db, post_id).await?.is_none() {
        return Err(ApiError::not_found("Post not found"));
    }

    let row = insert_comment(
        &state.db,
        post_id,
        user.user_id,
        request.parent_comment_id,
        content,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "comment": CommentResponse::from_row(&row, Vec::new()),
        })),
    ))
}

/// Handle DELETE /comments/{id} — cascades over the subtree.
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let row = get_comment(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;

    require_owner_or_admin(&user, row.author_id)?;

    let siblings = list_for_post(&state.db, row.post_id).await?;
    let subtree = collect_subtree(&siblings, id);
    let deleted = delete_comments(&state.db, &subtree).await?;

    tracing::info!(
        "Comment {} deleted by {} ({} rows including replies)",
        id,
        user.email,
        deleted
    );

    Ok(Json(json!({
        "success": true,
        "message": "Comment deleted successfully",
    })))
}
