/**
 * API Route Configuration
 *
 * Groups endpoint registrations by the middleware stack they sit behind:
 *
 * - Credential routes: public, rate-limited (5 attempts / 15 min / source)
 * - Refresh route: public (the refresh token itself is the credential)
 * - Content routes: bearer-token authenticated
 * - Admin routes: authenticated + admin role gate
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /auth/signup` - User registration (rate-limited)
 * - `POST /auth/login` - User login (rate-limited)
 * - `POST /auth/refresh` - Exchange refresh token for an access token
 * - `POST /auth/logout` - Revoke the presented refresh token
 * - `GET /auth/me` - Current user profile
 *
 * ## Posts & Comments
 * - `GET|POST /posts`, `GET|DELETE /posts/{id}`, `POST /posts/{id}/like`
 * - `GET|POST|DELETE /comments/{id}` (GET/POST take a post id, DELETE a
 *   comment id; one registration because the path shapes collide)
 *
 * ## Certifications & Materials
 * - `GET|POST /certifications`, `GET /certifications/admin/all`,
 *   `GET|DELETE /certifications/{id}`
 * - `GET|POST /materials`, `GET|PUT|DELETE /materials/{id}`
 *
 * ## Admin (nested under /admin, role-gated)
 * - `POST|GET /admin/colleges`, `GET|PUT|DELETE /admin/colleges/{id}`
 * - `GET /admin/users`, `DELETE /admin/users/{id}`
 */
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::admin::{
    create_college, delete_college, delete_user_account, get_college, get_colleges, get_users,
    update_college,
};
use crate::auth::{get_me, login, logout, refresh, signup};
use crate::certifications::{
    create_certification, delete_certification, get_all_certifications, get_certification,
    get_certifications,
};
use crate::comments::{create_comment, delete_comment, get_comments};
use crate::materials::{
    delete_material, get_material, get_materials, update_material, upload_material,
};
use crate::middleware::auth::{auth_middleware, require_admin_middleware};
use crate::middleware::rate_limit::auth_rate_limit_middleware;
use crate::posts::{create_post, delete_post, get_post, get_posts, toggle_like};
use crate::server::state::AppState;
use crate::storage::upload::upload_body_limit;

/// Public authentication routes. Signup and login sit behind the
/// fixed-window rate limiter; refresh authenticates with the refresh token
/// itself.
pub fn configure_auth_routes(state: AppState) -> Router<AppState> {
    let credential_routes = Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_rate_limit_middleware,
        ));

    let session_routes = Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(get_me))
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    credential_routes
        .route("/auth/refresh", post(refresh))
        .merge(session_routes)
}

/// Authenticated content routes: posts, comments, certifications,
/// materials. The multipart endpoints share the upload body limit.
pub fn configure_content_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/posts", get(get_posts).post(create_post))
        .route("/posts/{id}", get(get_post).delete(delete_post))
        .route("/posts/{id}/like", post(toggle_like))
        // GET/POST address a post id, DELETE a comment id. The path shapes
        // collide, so all three share one registration.
        .route(
            "/comments/{id}",
            get(get_comments).post(create_comment).delete(delete_comment),
        )
        .route(
            "/certifications",
            get(get_certifications).post(create_certification),
        )
        .route("/certifications/admin/all", get(get_all_certifications))
        .route(
            "/certifications/{id}",
            get(get_certification).delete(delete_certification),
        )
        .route("/materials", get(get_materials).post(upload_material))
        .route(
            "/materials/{id}",
            get(get_material).put(update_material).delete(delete_material),
        )
        .layer(upload_body_limit())
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Admin routes, nested under `/admin`. The role gate runs after the
/// authentication middleware.
pub fn configure_admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/colleges", post(create_college).get(get_colleges))
        .route(
            "/colleges/{id}",
            get(get_college).put(update_college).delete(delete_college),
        )
        .route("/users", get(get_users))
        .route("/users/{id}", delete(delete_user_account))
        .route_layer(middleware::from_fn(require_admin_middleware))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}
