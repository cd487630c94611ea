/**
 * College Database Operations
 *
 * Colleges are reference rows keyed by a unique name; students attach to
 * them by name at signup. Rows are read joined with the creating admin's
 * name for the admin listing.
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// College row joined with the creating admin's name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CollegeRow {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub website: Option<String>,
    pub created_by_admin_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub creator_name: String,
}

const COLLEGE_SELECT: &str = "SELECT c.id, c.name, c.address, c.contact_email, c.website, \
     c.created_by_admin_id, c.created_at, u.name AS creator_name \
     FROM colleges c JOIN users u ON u.id = c.created_by_admin_id";

/// Fields for a new or updated college.
#[derive(Debug)]
pub struct CollegeFields {
    pub name: String,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub website: Option<String>,
}

/// Insert a college. A duplicate name surfaces as a database unique
/// violation for the handler to translate.
pub async fn insert_college(
    pool: &PgPool,
    admin_id: Uuid,
    fields: CollegeFields,
) -> Result<CollegeRow, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO colleges (id, name, address, contact_email, website, created_by_admin_id, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(id)
    .bind(&fields.name)
    .bind(&fields.address)
    .bind(&fields.contact_email)
    .bind(&fields.website)
    .bind(admin_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    get_college_row(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Get a college by ID, or None if not found.
pub async fn get_college_row(pool: &PgPool, id: Uuid) -> Result<Option<CollegeRow>, sqlx::Error> {
    sqlx::query_as::<_, CollegeRow>(&format!("{COLLEGE_SELECT} WHERE c.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// List all colleges, alphabetical by name.
pub async fn list_colleges(pool: &PgPool) -> Result<Vec<CollegeRow>, sqlx::Error> {
    sqlx::query_as::<_, CollegeRow>(&format!("{COLLEGE_SELECT} ORDER BY c.name ASC"))
        .fetch_all(pool)
        .await
}

/// Update a college's fields. Returns the updated row, or None if the
/// college does not exist.
pub async fn update_college_row(
    pool: &PgPool,
    id: Uuid,
    fields: CollegeFields,
) -> Result<Option<CollegeRow>, sqlx::Error> {
    sqlx::query(
        "UPDATE colleges SET name = $1, address = $2, contact_email = $3, website = $4 \
         WHERE id = $5",
    )
    .bind(&fields.name)
    .bind(&fields.address)
    .bind(&fields.contact_email)
    .bind(&fields.website)
    .bind(id)
    .execute(pool)
    .await?;

    get_college_row(pool, id).await
}

/// Delete a college row. Returns false when it did not exist.
pub async fn delete_college_row(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM colleges WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
