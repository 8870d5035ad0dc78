//! Tubely Core Library
//!
//! This crate provides the domain models, error types and configuration shared by the
//! upload service crates.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, UploadConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{extension_for, MediaKind, Video};
pub use storage_types::StorageBackend;
