/**
 * User Model and Database Operations
 *
 * This module handles user rows and the stateful half of the refresh-token
 * lifecycle: the bounded token list stored on each user.
 *
 * The token list is mutated read-modify-write with no optimistic
 * concurrency guard; concurrent logins/logouts for the same account are
 * last-write-wins, mirroring the per-document semantics of the data model.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Maximum number of concurrently valid refresh tokens per user.
pub const MAX_REFRESH_TOKENS: usize = 5;

/// User row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address (unique, stored lowercased)
    pub email: String,
    /// Hashed password (bcrypt, cost 12)
    pub password_hash: String,
    /// Role: "student" or "admin"
    pub role: String,
    /// College association (null for admins)
    pub college_name: Option<String>,
    /// Optional profile picture reference
    pub profile_picture_url: Option<String>,
    /// Short bio
    pub bio: String,
    /// Currently-valid refresh tokens (max 5, oldest evicted first)
    pub refresh_tokens: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const USER_COLUMNS: &str = "id, name, email, password_hash, role, college_name, \
     profile_picture_url, bio, refresh_tokens, created_at, updated_at";

/// Append a token, evicting the oldest entries beyond the cap (FIFO).
pub fn appended_tokens(mut tokens: Vec<String>, token: String) -> Vec<String> {
    tokens.push(token);
    let overflow = tokens.len().saturating_sub(MAX_REFRESH_TOKENS);
    if overflow > 0 {
        tokens.drain(..overflow);
    }
    tokens
}

/// Remove exactly the given token; absent tokens are a no-op.
pub fn without_token(tokens: Vec<String>, token: &str) -> Vec<String> {
    tokens.into_iter().filter(|t| t != token).collect()
}

/// Create a new user. The email must already be lowercased and the password
/// hashed by the caller.
pub async fn create_user(
    pool: &PgPool,
    name: String,
    email: String,
    password_hash: String,
    role: &str,
    college_name: Option<String>,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (id, name, email, password_hash, role, college_name, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING {USER_COLUMNS}"
    ))
    .bind(id)
    .bind(&name)
    .bind(&email)
    .bind(&password_hash)
    .bind(role)
    .bind(&college_name)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get user by email, or None if not registered.
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Get user by ID, or None if not found.
pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Append a refresh token to the user's list, keeping only the newest
/// `MAX_REFRESH_TOKENS` entries, and persist the row.
pub async fn push_refresh_token(
    pool: &PgPool,
    user_id: Uuid,
    token: &str,
) -> Result<(), sqlx::Error> {
    let tokens: Vec<String> =
        sqlx::query_scalar("SELECT refresh_tokens FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    let tokens = appended_tokens(tokens, token.to_string());

    sqlx::query("UPDATE users SET refresh_tokens = $1, updated_at = $2 WHERE id = $3")
        .bind(&tokens)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Remove exactly the presented refresh token from the user's list.
/// Idempotent: removing an absent token still persists successfully.
pub async fn remove_refresh_token(
    pool: &PgPool,
    user_id: Uuid,
    token: &str,
) -> Result<(), sqlx::Error> {
    let tokens: Vec<String> =
        sqlx::query_scalar("SELECT refresh_tokens FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    let tokens = without_token(tokens, token);

    sqlx::query("UPDATE users SET refresh_tokens = $1, updated_at = $2 WHERE id = $3")
        .bind(&tokens)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// List users with optional role/college filters, newest first.
pub async fn list_users(
    pool: &PgPool,
    role: Option<&str>,
    college: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users \
         WHERE ($1::text IS NULL OR role = $1) \
           AND ($2::text IS NULL OR college_name = $2) \
         ORDER BY created_at DESC LIMIT $3 OFFSET $4"
    ))
    .bind(role)
    .bind(college)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Count users matching the same filters as `list_users`.
pub async fn count_users(
    pool: &PgPool,
    role: Option<&str>,
    college: Option<&str>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM users \
         WHERE ($1::text IS NULL OR role = $1) \
           AND ($2::text IS NULL OR college_name = $2)",
    )
    .bind(role)
    .bind(college)
    .fetch_one(pool)
    .await
}

/// Delete a user row. Returns false when the user did not exist.
pub async fn delete_user(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_append_below_cap_keeps_all() {
        let result = appended_tokens(tokens(&["a", "b"]), "c".to_string());
        assert_eq!(result, tokens(&["a", "b", "c"]));
    }

    #[test]
    fn test_append_at_cap_evicts_oldest_first() {
        let full = tokens(&["t1", "t2", "t3", "t4", "t5"]);
        let result = appended_tokens(full, "t6".to_string());
        assert_eq!(result, tokens(&["t2", "t3", "t4", "t5", "t6"]));
    }

    #[test]
    fn test_repeated_appends_never_exceed_cap() {
        let mut list = Vec::new();
        for i in 0..20 {
            list = appended_tokens(list, format!("token-{i}"));
            assert!(list.len() <= MAX_REFRESH_TOKENS);
        }
        // The five newest survive, in issue order.
        assert_eq!(
            list,
            tokens(&["token-15", "token-16", "token-17", "token-18", "token-19"])
        );
    }

    #[test]
    fn test_remove_exact_token_only() {
        let result = without_token(tokens(&["a", "b", "a2"]), "a");
        assert_eq!(result, tokens(&["b", "a2"]));
    }

    #[test]
    fn test_remove_absent_token_is_noop() {
        let result = without_token(tokens(&["a", "b"]), "missing");
        assert_eq!(result, tokens(&["a", "b"]));
    }
}
