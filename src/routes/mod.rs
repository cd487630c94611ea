//! Routes Module
//!
//! HTTP route configuration. `router.rs` assembles the full application
//! router; `api_routes.rs` groups the endpoint registrations by the
//! middleware they sit behind (rate-limited, authenticated, admin-gated).

/// Main router assembly
pub mod router;

/// Endpoint registrations grouped by middleware
pub mod api_routes;

pub use router::create_router;
