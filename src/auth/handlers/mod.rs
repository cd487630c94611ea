//! Authentication Handlers
//!
//! HTTP handlers for the auth endpoints. Request/response shapes and the
//! refresh-cookie helpers live in `types.rs`; each endpoint gets its own
//! file.

/// Request/response types and refresh cookie helpers
pub mod types;

/// POST /auth/signup
pub mod signup;

/// POST /auth/login
pub mod login;

/// POST /auth/refresh
pub mod refresh;

/// POST /auth/logout
pub mod logout;

/// GET /auth/me
pub mod me;

pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use refresh::refresh;
pub use signup::signup;
