//! Data models for the application
//!
//! `video` holds the owned record the uploads attach to; `upload` describes the two upload kinds.

mod upload;
mod video;

// Re-export all models for convenient imports
pub use upload::*;
pub use video::*;
