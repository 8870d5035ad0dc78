//! Application state shared by every request.
//!
//! Built once at startup (or by a test harness) and handed to the router behind an `Arc`.
//! Each collaborator sits behind a trait object so backends can be swapped without touching
//! the handlers.

use std::path::PathBuf;
use std::sync::Arc;

use tubely_core::AppError;
use tubely_db::VideoStore;
use tubely_processing::ContentProbe;
use tubely_storage::Storage;

use crate::auth::TokenVerifier;
use crate::error::HttpAppError;
use crate::services::upload::UploadLimits;

#[derive(Clone)]
pub struct AppState {
    pub videos: Arc<dyn VideoStore>,
    pub storage: Arc<dyn Storage>,
    pub probe: Arc<dyn ContentProbe>,
    pub auth: Arc<dyn TokenVerifier>,
    pub limits: UploadLimits,
    /// Directory video payloads are staged in before probing.
    pub staging_dir: PathBuf,
    /// Taken from `Config::is_production`; hides error details from clients.
    pub production: bool,
}

impl AppState {
    /// Wrap `error` for rendering under this deployment's detail policy.
    pub fn http_error(&self, error: AppError) -> HttpAppError {
        HttpAppError::new(error, !self.production)
    }
}
