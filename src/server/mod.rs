//! Server Module
//!
//! Server initialization, application state, and configuration loading.
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports
//! ├── config.rs - Environment-driven configuration (database, storage, cookies)
//! ├── init.rs   - Application assembly
//! └── state.rs  - AppState and FromRef implementations
//! ```

/// Environment-driven configuration
pub mod config;

/// Application assembly
pub mod init;

/// Application state
pub mod state;

pub use init::create_app;
pub use state::AppState;
