//! Admin Module
//!
//! Administrative operations behind the `/admin` role gate: college
//! management and user administration. The role check itself lives in the
//! middleware layer; these handlers assume an admin caller.

/// College database operations
pub mod colleges;

/// HTTP handlers for admin endpoints
pub mod handlers;

pub use handlers::{
    create_college, delete_college, delete_user_account, get_college, get_colleges, get_users,
    update_college,
};
