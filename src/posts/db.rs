/**
 * Post Database Operations
 *
 * Post rows are always read joined with their author so responses can
 * embed the author's name, college, and profile picture without a second
 * query. Likes are a UUID array on the row, mutated read-modify-write.
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Post row joined with author profile fields.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub post_type: String,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_name: String,
    pub author_college_name: Option<String>,
    pub author_profile_picture_url: Option<String>,
}

const POST_SELECT: &str = "SELECT p.id, p.author_id, p.content, p.image_url, p.post_type, \
     p.likes, p.created_at, p.updated_at, \
     u.name AS author_name, u.college_name AS author_college_name, \
     u.profile_picture_url AS author_profile_picture_url \
     FROM posts p JOIN users u ON u.id = p.author_id";

/// Toggle a user's membership in a like list. Returns the new list and
/// whether the user is now a liker.
pub fn toggled_likes(mut likes: Vec<Uuid>, user_id: Uuid) -> (Vec<Uuid>, bool) {
    if let Some(position) = likes.iter().position(|id| *id == user_id) {
        likes.remove(position);
        (likes, false)
    } else {
        likes.push(user_id);
        (likes, true)
    }
}

/// Insert a post and return it joined with its author.
pub async fn insert_post(
    pool: &PgPool,
    author_id: Uuid,
    content: &str,
    image_url: Option<&str>,
    post_type: &str,
) -> Result<PostRow, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO posts (id, author_id, content, image_url, post_type, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(id)
    .bind(author_id)
    .bind(content)
    .bind(image_url)
    .bind(post_type)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_post(pool, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Get a post by ID, or None if not found.
pub async fn get_post(pool: &PgPool, id: Uuid) -> Result<Option<PostRow>, sqlx::Error> {
    sqlx::query_as::<_, PostRow>(&format!("{POST_SELECT} WHERE p.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List posts newest first, optionally restricted to authors from one
/// college.
pub async fn list_posts(
    pool: &PgPool,
    college: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostRow>, sqlx::Error> {
    sqlx::query_as::<_, PostRow>(&format!(
        "{POST_SELECT} WHERE ($1::text IS NULL OR u.college_name = $1) \
         ORDER BY p.created_at DESC LIMIT $2 OFFSET $3"
    ))
    .bind(college)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Count posts matching the same filter as `list_posts`.
pub async fn count_posts(pool: &PgPool, college: Option<&str>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM posts p JOIN users u ON u.id = p.author_id \
         WHERE ($1::text IS NULL OR u.college_name = $1)",
    )
    .bind(college)
    .fetch_one(pool)
    .await
}

/// Persist a post's like list.
pub async fn set_likes(pool: &PgPool, id: Uuid, likes: &[Uuid]) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE posts SET likes = $1, updated_at = $2 WHERE id = $3")
        .bind(likes)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a post row. Returns false when the post did not exist.
pub async fn delete_post_row(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_new_liker() {
        let user = Uuid::new_v4();
        let (likes, is_liked) = toggled_likes(vec![], user);
        assert!(is_liked);
        assert_eq!(likes, vec![user]);
    }

    #[test]
    fn test_toggle_removes_existing_liker() {
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let (likes, is_liked) = toggled_likes(vec![other, user], user);
        assert!(!is_liked);
        assert_eq!(likes, vec![other]);
    }

    #[test]
    fn test_double_toggle_restores_membership() {
        let user = Uuid::new_v4();
        let (likes, _) = toggled_likes(vec![], user);
        let (likes, is_liked) = toggled_likes(likes, user);
        assert!(!is_liked);
        assert!(likes.is_empty());
    }
}
