/**
 * Server Initialization
 *
 * Assembles the Axum application: database pool (with migrations), object
 * store, rate limiter, cookie settings, and the router.
 */
use std::sync::Arc;

use axum::Router;

use crate::middleware::rate_limit::FixedWindowLimiter;
use crate::routes::router::create_router;
use crate::server::config::{load_database, load_object_store, CookieSettings};
use crate::server::state::AppState;

/// Create and configure the Axum application.
///
/// Fails when the database is unavailable; every other service degrades
/// with a logged warning instead of blocking startup.
pub async fn create_app() -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing EduConnect backend server");

    let db = load_database().await?;
    let store = load_object_store();

    let app_state = AppState {
        db,
        store,
        auth_limiter: Arc::new(FixedWindowLimiter::auth_default()),
        cookies: CookieSettings::from_env(),
    };

    Ok(create_router(app_state))
}
