//! Tubely API Library
//!
//! HTTP surface of the upload service: thumbnail and video upload handlers, the upload
//! pipeline behind them, and application setup.

mod api_doc;
mod handlers;

pub mod auth;
pub mod error;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::upload::{UploadLimits, UploadPipeline};
pub use state::AppState;
