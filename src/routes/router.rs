/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route groups into a single Axum router.
 *
 * # Route Order
 *
 * 1. Authentication routes (rate-limited credential endpoints, refresh,
 *    session endpoints)
 * 2. Content routes (posts, comments, certifications, materials)
 * 3. Admin routes nested under `/admin` (role-gated)
 * 4. Fallback handler (404 JSON body)
 *
 * CORS and request tracing wrap the whole router.
 */
use axum::{http::StatusCode, Json, Router};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::routes::api_routes::{
    configure_admin_routes, configure_auth_routes, configure_content_routes,
};
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (database pool, object store, rate
///   limiter, cookie settings)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .merge(configure_auth_routes(app_state.clone()))
        .merge(configure_content_routes(app_state.clone()))
        .nest("/admin", configure_admin_routes(app_state.clone()));

    // Fallback handler for 404
    let router = router.fallback(|| async {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Route not found" })),
        )
    });

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
