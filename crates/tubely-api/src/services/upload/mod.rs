//! Media upload pipeline shared by the thumbnail and video endpoints.

pub mod pipeline;
pub mod staging;
pub mod types;

pub use pipeline::UploadPipeline;
pub use staging::StagedUpload;
pub use types::{AcceptedMedia, UploadLimits};
