//! Posts Module
//!
//! Feed posts: creation with an optional image upload, listing with an
//! optional college filter, like toggling, and deletion. Certification
//! posts are created by the certifications module and share its deletion
//! lifecycle.

/// Post database operations
pub mod db;

/// HTTP handlers for post endpoints
pub mod handlers;

pub use handlers::{create_post, delete_post, get_post, get_posts, toggle_like};
