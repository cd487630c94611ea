//! Authentication Module
//!
//! This module handles user identity, the access/refresh token lifecycle,
//! and the HTTP handlers for the auth endpoints.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports
//! ├── users.rs        - User model and database operations
//! ├── tokens.rs       - Access/refresh JWT issuance and verification
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types, refresh cookie helpers
//!     ├── signup.rs   - POST /auth/signup
//!     ├── login.rs    - POST /auth/login
//!     ├── refresh.rs  - POST /auth/refresh
//!     ├── logout.rs   - POST /auth/logout
//!     └── me.rs       - GET /auth/me
//! ```
//!
//! # Token Lifecycle
//!
//! Access tokens are short-lived and verified statelessly. Refresh tokens
//! live for 7 days and are additionally checked against the bounded list
//! stored on the user row (max 5, oldest evicted first), so logout revokes
//! them even while they remain cryptographically valid.

/// User data model and database operations
pub mod users;

/// JWT token issuance and verification
pub mod tokens;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
pub use handlers::{get_me, login, logout, refresh, signup};
