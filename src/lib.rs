//! EduConnect - Main Library
//!
//! EduConnect is a social-networking and learning-material backend for
//! college communities, built as an Axum HTTP API over PostgreSQL.
//!
//! # Overview
//!
//! This library provides the core functionality for EduConnect, including:
//! - Token-based authentication (short-lived access JWTs plus revocable
//!   refresh tokens) with bcrypt password storage
//! - Feed posts with image uploads, likes, and threaded comments
//! - Certification records paired with announcement posts
//! - College-scoped study materials uploaded by administrators
//! - Admin operations: college management and user administration
//!
//! # Module Structure
//!
//! - **`auth`** - Users, the token lifecycle, and the auth endpoints
//! - **`posts`** / **`comments`** / **`certifications`** / **`materials`**
//!   - Content entities, one module per feature with `db` and `handlers`
//! - **`admin`** - College CRUD and user administration
//! - **`policy`** - Centralized authorization predicates and role enums
//! - **`storage`** - Object store abstraction (S3 or in-memory) and the
//!   upload pipeline
//! - **`middleware`** - Bearer authentication, admin gate, rate limiting
//! - **`routes`** / **`server`** - Router assembly and application state
//! - **`error`** / **`pagination`** - Shared API error type and list
//!   pagination

/// Administrative operations (colleges, users)
pub mod admin;

/// Authentication: users, tokens, auth endpoints
pub mod auth;

/// Certification records and their paired posts
pub mod certifications;

/// Threaded comments
pub mod comments;

/// API error type and response conversion
pub mod error;

/// College-scoped study materials
pub mod materials;

/// Request middleware (auth, admin gate, rate limiting)
pub mod middleware;

/// List pagination parameters and metadata
pub mod pagination;

/// Authorization predicates and role/visibility enums
pub mod policy;

/// Feed posts
pub mod posts;

/// HTTP route configuration
pub mod routes;

/// Server assembly, configuration, and state
pub mod server;

/// Object storage and the upload pipeline
pub mod storage;
