//! Certifications Module
//!
//! User-owned certification records with an optional credential file.
//! Creating a certification also creates a paired feed post of type
//! `certification`; deleting either side removes the other, so the pair
//! never survives half-deleted (aside from the unavoidable window between
//! the two non-transactional writes).

/// Certification database operations
pub mod db;

/// HTTP handlers for certification endpoints
pub mod handlers;

pub use handlers::{
    create_certification, delete_certification, get_all_certifications, get_certification,
    get_certifications,
};
