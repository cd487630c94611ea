/**
 * Comment Database Operations
 *
 * Comments are read joined with their author. `parent_comment_id` carries
 * no foreign key: a parent may have been deleted out from under its
 * replies by an older writer, and the tree builder promotes such orphans
 * to roots instead of dropping them.
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Comment row joined with author profile fields.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub parent_comment_id: Option<Uuid>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub author_profile_picture_url: Option<String>,
}

const COMMENT_SELECT: &str = "SELECT c.id, c.post_id, c.author_id, c.parent_comment_id, \
     c.content, c.created_at, \
     u.name AS author_name, u.profile_picture_url AS author_profile_picture_url \
     FROM comments c JOIN users u ON u.id = c.author_id";

/// All comments for a post, creation-ascending (the order the tree builder
/// expects).
pub async fn list_for_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<CommentRow>, sqlx::Error> {
    sqlx::query_as::<_, CommentRow>(&format!(
        "{COMMENT_SELECT} WHERE c.post_id = $1 ORDER BY c.created_at ASC"
    ))
    .bind(post_id)
    .fetch_all(pool)
    .await
}

/// Insert a comment and return it joined with its author.
pub async fn insert_comment(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    parent_comment_id: Option<Uuid>,
    content: &str,
) -> Result<CommentRow, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO comments (id, post_id, author_id, parent_comment_id, content, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(id)
    .bind(post_id)
    .bind(author_id)
    .bind(parent_comment_id)
    .bind(content)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    get_comment(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Get a comment by ID, or None if not found.
pub async fn get_comment(pool: &PgPool, id: Uuid) -> Result<Option<CommentRow>, sqlx::Error> {
    sqlx::query_as::<_, CommentRow>(&format!("{COMMENT_SELECT} WHERE c.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Bulk-delete comments by ID. Returns the number of rows removed.
pub async fn delete_comments(pool: &PgPool, ids: &[Uuid]) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ANY($1)")
        .bind(ids)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
