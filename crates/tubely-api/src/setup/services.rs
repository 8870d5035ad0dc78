//! Collaborator construction and application state setup

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tubely_core::Config;
use tubely_db::PgVideoStore;
use tubely_processing::FfprobeProbe;
use tubely_storage::create_storage;

use crate::auth::JwtService;
use crate::services::upload::UploadLimits;
use crate::state::AppState;

/// Wire the production collaborators into an [`AppState`].
pub async fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(backend = %config.storage_backend(), "Storage backend ready");

    let state = AppState {
        videos: Arc::new(PgVideoStore::new(pool)),
        storage,
        probe: Arc::new(FfprobeProbe::new(config.ffprobe_path())),
        auth: Arc::new(JwtService::new(
            config.jwt_secret(),
            config.jwt_expiry_hours(),
        )),
        limits: UploadLimits::from_config(config),
        staging_dir: config.staging_dir(),
        production: config.is_production(),
    };

    Ok(Arc::new(state))
}
