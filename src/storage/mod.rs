//! Object Storage Module
//!
//! This module owns the upload pipeline and the object-storage abstraction.
//! File bytes live in external object storage; database rows keep only the
//! returned URL reference.
//!
//! # Module Structure
//!
//! ```text
//! storage/
//! ├── mod.rs    - ObjectStore trait and StorageError
//! ├── s3.rs     - S3-backed store
//! ├── memory.rs - In-memory store for development and tests
//! └── upload.rs - Validation, key derivation, multipart reading
//! ```
//!
//! # Failure Semantics
//!
//! Upload failures abort the owning create operation. Delete failures are
//! logged and swallowed: metadata deletion proceeds and an orphaned stored
//! object is an accepted outcome.

use async_trait::async_trait;
use thiserror::Error;

/// Object storage operations
pub mod s3;

/// In-memory store for development and tests
pub mod memory;

/// Upload validation, key derivation, and multipart parsing
pub mod upload;

pub use memory::MemoryStore;
pub use s3::S3Store;

/// Errors from object-storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage backend rejected or failed the operation.
    #[error("storage operation failed: {0}")]
    Upstream(String),

    /// The store is misconfigured (missing bucket, bad region, ...).
    #[error("storage configuration error: {0}")]
    Configuration(String),
}

/// Keyed object storage.
///
/// Implementations store opaque byte payloads under caller-derived keys and
/// return an absolute, addressable URL for each stored object.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key` and return the object's public URL.
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Delete the object stored under `key`. Deleting an absent key is not
    /// an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
