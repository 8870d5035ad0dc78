//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;
use tubely_core::AppError;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed reader handed to [`Storage::put_stream`].
pub type ByteReader = Pin<Box<dyn AsyncRead + Send + Unpin>>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// Storage abstraction trait
///
/// The upload pipeline holds one `Arc<dyn Storage>` chosen at startup and never needs to know
/// which backend is behind it. Every write returns the URL clients use to fetch the object.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store the contents of `reader` (consumed until EOF) under `storage_key` and return its
    /// public URL.
    ///
    /// `content_length` is a hint for backends that can preallocate.
    async fn put_stream(
        &self,
        storage_key: &str,
        content_type: &str,
        content_length: Option<u64>,
        reader: ByteReader,
    ) -> StorageResult<String>;

    /// Delete an object. Deleting a missing object is not an error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
