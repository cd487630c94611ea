/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction, so handlers can take just
 * the pool or the object store instead of the full `AppState`.
 *
 * # Thread Safety
 *
 * All fields are cheaply cloneable handles: `PgPool` is an internal Arc,
 * the object store and rate limiter are shared behind `Arc`.
 */
use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::middleware::rate_limit::FixedWindowLimiter;
use crate::server::config::CookieSettings;
use crate::storage::ObjectStore;

/// Central state container for the Axum application.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub db: PgPool,

    /// Object storage for uploaded files
    pub store: Arc<dyn ObjectStore>,

    /// Fixed-window rate limiter for the signup/login endpoints
    pub auth_limiter: Arc<FixedWindowLimiter>,

    /// Refresh-cookie attributes
    pub cookies: CookieSettings,
}

impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ObjectStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}
