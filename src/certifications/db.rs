/**
 * Certification Database Operations
 *
 * Rows are read joined with their owner so responses can embed the
 * owner's name and college. The `post_id` back-reference links to the
 * paired feed post created alongside each certification.
 */
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Certification row joined with owner profile fields.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CertificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub organization: String,
    pub issue_date: NaiveDate,
    pub credential_url: Option<String>,
    pub file_url: Option<String>,
    pub description: String,
    pub visibility: String,
    pub post_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_college_name: Option<String>,
}

const CERTIFICATION_SELECT: &str = "SELECT c.id, c.user_id, c.title, c.organization, \
     c.issue_date, c.credential_url, c.file_url, c.description, c.visibility, c.post_id, \
     c.created_at, u.name AS user_name, u.college_name AS user_college_name \
     FROM certifications c JOIN users u ON u.id = c.user_id";

/// Fields for a new certification. The paired post is created separately.
#[derive(Debug)]
pub struct NewCertification {
    pub user_id: Uuid,
    pub title: String,
    pub organization: String,
    pub issue_date: NaiveDate,
    pub credential_url: Option<String>,
    pub file_url: Option<String>,
    pub description: String,
}

/// Insert a certification and return it joined with its owner.
pub async fn insert_certification(
    pool: &PgPool,
    new: NewCertification,
) -> Result<CertificationRow, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO certifications \
         (id, user_id, title, organization, issue_date, credential_url, file_url, description, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(id)
    .bind(new.user_id)
    .bind(&new.title)
    .bind(&new.organization)
    .bind(new.issue_date)
    .bind(&new.credential_url)
    .bind(&new.file_url)
    .bind(&new.description)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    get_certification(pool, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Link a certification to its paired post.
pub async fn set_post_id(pool: &PgPool, id: Uuid, post_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE certifications SET post_id = $1 WHERE id = $2")
        .bind(post_id)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Get a certification by ID, or None if not found.
pub async fn get_certification(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<CertificationRow>, sqlx::Error> {
    sqlx::query_as::<_, CertificationRow>(&format!("{CERTIFICATION_SELECT} WHERE c.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Get the certification paired with a post, if any.
pub async fn get_certification_by_post_id(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Option<CertificationRow>, sqlx::Error> {
    sqlx::query_as::<_, CertificationRow>(&format!("{CERTIFICATION_SELECT} WHERE c.post_id = $1"))
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

/// List a user's certifications, newest first.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<CertificationRow>, sqlx::Error> {
    sqlx::query_as::<_, CertificationRow>(&format!(
        "{CERTIFICATION_SELECT} WHERE c.user_id = $1 \
         ORDER BY c.created_at DESC LIMIT $2 OFFSET $3"
    ))
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Count a user's certifications.
pub async fn count_for_user(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM certifications WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// List all certifications (admin view), optionally filtered by the
/// owner's college, newest first.
pub async fn list_all(
    pool: &PgPool,
    college: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<CertificationRow>, sqlx::Error> {
    sqlx::query_as::<_, CertificationRow>(&format!(
        "{CERTIFICATION_SELECT} WHERE ($1::text IS NULL OR u.college_name = $1) \
         ORDER BY c.created_at DESC LIMIT $2 OFFSET $3"
    ))
    .bind(college)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Count certifications matching the same filter as `list_all`.
pub async fn count_all(pool: &PgPool, college: Option<&str>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM certifications c JOIN users u ON u.id = c.user_id \
         WHERE ($1::text IS NULL OR u.college_name = $1)",
    )
    .bind(college)
    .fetch_one(pool)
    .await
}

/// Delete a certification row. Returns false when it did not exist.
pub async fn delete_certification_row(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM certifications WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
