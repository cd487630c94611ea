//! API Error Module
//!
//! This module defines the error taxonomy for the EduConnect API.
//! Every handler returns `Result<_, ApiError>`; the error is converted
//! to an HTTP response at the boundary.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Taxonomy
//!
//! - `Validation` - malformed or missing input (400, `{"errors": [...]}`)
//! - `Authentication` - missing/invalid/expired token or credentials (401)
//! - `Authorization` - authenticated but forbidden action (403)
//! - `NotFound` - referenced entity absent (404)
//! - `UpstreamStorage` - object-storage operation failed (500)
//! - `Database` / `Internal` - unexpected failures, returned as a generic 500

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::ApiError;
