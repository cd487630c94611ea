//! Materials Module
//!
//! College-scoped study materials. Admins upload and manage them; students
//! read only materials belonging to their own college.

/// Material database operations
pub mod db;

/// HTTP handlers for material endpoints
pub mod handlers;

pub use handlers::{
    delete_material, get_material, get_materials, update_material, upload_material,
};
