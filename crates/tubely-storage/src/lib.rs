//! Tubely Storage Library
//!
//! This crate provides the object storage abstraction used by the upload pipeline and its
//! implementations: S3 (or an S3-compatible provider), a local assets directory, and inline
//! `data:` URIs that need no backend at all.
//!
//! # Storage key format
//!
//! Keys are `[<prefix>/]<random>.<ext>` where `<random>` is 32 bytes from the OS RNG encoded as
//! unpadded base64url. Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod inline;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use inline::InlineStorage;
pub use keys::{generate_key, KeyError};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ByteReader, Storage, StorageError, StorageResult};
pub use tubely_core::StorageBackend;
