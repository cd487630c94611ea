/**
 * Material Database Operations
 *
 * Materials are read joined with the uploading admin's name. The college
 * filter is resolved by the policy layer before it reaches these queries:
 * students always arrive here scoped to their own college.
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Material row joined with uploader name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MaterialRow {
    pub id: Uuid,
    pub uploaded_by_admin_id: Uuid,
    pub college_name: String,
    pub title: String,
    pub description: String,
    pub file_url: String,
    pub file_type: String,
    pub file_size: i64,
    pub visibility: String,
    pub created_at: DateTime<Utc>,
    pub uploader_name: String,
}

const MATERIAL_SELECT: &str = "SELECT m.id, m.uploaded_by_admin_id, m.college_name, m.title, \
     m.description, m.file_url, m.file_type, m.file_size, m.visibility, m.created_at, \
     u.name AS uploader_name \
     FROM materials m JOIN users u ON u.id = m.uploaded_by_admin_id";

/// Fields for a new material.
#[derive(Debug)]
pub struct NewMaterial {
    pub uploaded_by_admin_id: Uuid,
    pub college_name: String,
    pub title: String,
    pub description: String,
    pub file_url: String,
    pub file_type: String,
    pub file_size: i64,
}

/// Insert a material and return it joined with its uploader.
pub async fn insert_material(pool: &PgPool, new: NewMaterial) -> Result<MaterialRow, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO materials \
         (id, uploaded_by_admin_id, college_name, title, description, file_url, file_type, file_size, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(id)
    .bind(new.uploaded_by_admin_id)
    .bind(&new.college_name)
    .bind(&new.title)
    .bind(&new.description)
    .bind(&new.file_url)
    .bind(&new.file_type)
    .bind(new.file_size)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    get_material(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Get a material by ID, or None if not found.
pub async fn get_material(pool: &PgPool, id: Uuid) -> Result<Option<MaterialRow>, sqlx::Error> {
    sqlx::query_as::<_, MaterialRow>(&format!("{MATERIAL_SELECT} WHERE m.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List materials newest first, optionally filtered by college.
pub async fn list_materials(
    pool: &PgPool,
    college: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<MaterialRow>, sqlx::Error> {
    sqlx::query_as::<_, MaterialRow>(&format!(
        "{MATERIAL_SELECT} WHERE ($1::text IS NULL OR m.college_name = $1) \
         ORDER BY m.created_at DESC LIMIT $2 OFFSET $3"
    ))
    .bind(college)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Count materials matching the same filter as `list_materials`.
pub async fn count_materials(pool: &PgPool, college: Option<&str>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM materials WHERE ($1::text IS NULL OR college_name = $1)",
    )
    .bind(college)
    .fetch_one(pool)
    .await
}

/// Partially update a material's title/description. Returns the updated
/// row, or None if the material does not exist.
pub async fn update_material_row(
    pool: &PgPool,
    id: Uuid,
    title: Option<&str>,
    description: Option<&str>,
) -> Result<Option<MaterialRow>, sqlx::Error> {
    sqlx::query(
        "UPDATE materials SET \
         title = COALESCE($1, title), \
         description = COALESCE($2, description) \
         WHERE id = $3",
    )
    .bind(title)
    .bind(description)
    .bind(id)
    .execute(pool)
    .await?;

    get_material(pool, id).await
}

/// Delete a material row. Returns false when it did not exist.
pub async fn delete_material_row(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM materials WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
