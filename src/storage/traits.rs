//! Storage traits and error types
//!
//! This module defines the interface of the remote object store and the errors
//! any storage tier can raise.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed artifact: {0}")]
    Malformed(String),

    #[error("Invalid storage endpoint: {0}")]
    Endpoint(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        StorageError::Network(crate::concise_error(&err))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Remote object storage
///
/// The scraper only needs these three operations, so any vendor can sit
/// behind this trait.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `bytes` to `path` in `bucket`
    async fn put(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Reads the object at `path` in `bucket`
    async fn get(&self, bucket: &str, path: &str) -> StorageResult<Vec<u8>>;

    /// Checks that `bucket` exists and is reachable with the current credentials
    async fn exists(&self, bucket: &str) -> StorageResult<bool>;
}
