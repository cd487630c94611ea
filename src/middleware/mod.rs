//! Middleware Module
//!
//! Request-processing middleware: bearer-token authentication with an
//! `AuthUser` extractor, an admin role gate for the `/admin` subtree, and
//! a fixed-window rate limiter for the credential endpoints.

/// Authentication middleware and extractor
pub mod auth;

/// Fixed-window rate limiting
pub mod rate_limit;

pub use auth::{auth_middleware, require_admin_middleware, AuthUser, AuthenticatedUser};
pub use rate_limit::{auth_rate_limit_middleware, FixedWindowLimiter};
