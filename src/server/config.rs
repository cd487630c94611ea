/**
 * Server Configuration
 *
 * Loads and validates server configuration from environment variables:
 * the PostgreSQL pool (required), the object store (S3 when configured,
 * in-memory fallback otherwise), and refresh-cookie attributes.
 *
 * # Error Handling
 *
 * The database is required: the API cannot serve anything without it, so a
 * missing or unreachable `DATABASE_URL` aborts startup. The object store is
 * optional: without S3 configuration the server starts with an in-memory
 * store and a warning, which loses uploads across restarts but keeps
 * development working.
 */
use std::sync::Arc;

use axum_extra::extract::cookie::SameSite;
use sqlx::PgPool;

use crate::storage::{MemoryStore, ObjectStore, S3Store};

/// Attributes applied to the `refreshToken` cookie.
#[derive(Debug, Clone, Copy)]
pub struct CookieSettings {
    /// Set the Secure attribute (`COOKIE_SECURE=true`).
    pub secure: bool,
    /// SameSite policy (`COOKIE_SAME_SITE`: lax | strict | none).
    pub same_site: SameSite,
}

impl CookieSettings {
    pub fn from_env() -> Self {
        let secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true")
            .unwrap_or(false);
        let same_site = match std::env::var("COOKIE_SAME_SITE").as_deref() {
            Ok("strict") => SameSite::Strict,
            Ok("none") => SameSite::None,
            _ => SameSite::Lax,
        };
        Self { secure, same_site }
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            secure: false,
            same_site: SameSite::Lax,
        }
    }
}

/// Connect to PostgreSQL via `DATABASE_URL` and run migrations.
pub async fn load_database() -> Result<PgPool, sqlx::Error> {
    let database_url = std::env::var("DATABASE_URL").map_err(|_| {
        tracing::error!("DATABASE_URL not set");
        sqlx::Error::Configuration("DATABASE_URL not set".into())
    })?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {:?}", e);
        sqlx::Error::Migrate(Box::new(e))
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

/// Build the object store from S3 environment configuration, falling back
/// to an in-memory store when S3 is not configured.
pub fn load_object_store() -> Arc<dyn ObjectStore> {
    match S3Store::from_env() {
        Ok(store) => {
            tracing::info!("Object storage: S3");
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!(
                "S3 not configured ({}); falling back to in-memory object storage",
                e
            );
            Arc::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_settings_default() {
        let settings = CookieSettings::default();
        assert!(!settings.secure);
        assert_eq!(settings.same_site, SameSite::Lax);
    }
}
