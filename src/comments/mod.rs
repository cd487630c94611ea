//! Comments Module
//!
//! Threaded comments on posts. Comments are stored flat with a nullable
//! parent reference; the tree builder assembles the nested forest at read
//! time and deletion cascades over the subtree.

/// Comment database operations
pub mod db;

/// Flat-to-forest assembly and subtree collection
pub mod tree;

/// HTTP handlers for comment endpoints
pub mod handlers;

pub use handlers::{create_comment, delete_comment, get_comments};
