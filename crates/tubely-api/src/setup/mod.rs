//! Application setup and initialization
//!
//! Everything `main` needs to go from a loaded [`Config`] to a router ready to serve.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::Result;
use std::sync::Arc;
use tubely_core::Config;

/// Initialize the entire application
pub async fn initialize_app(config: &Config) -> Result<(Arc<AppState>, axum::Router)> {
    tracing::info!(environment = %config.environment(), "Configuration loaded and validated");

    let pool = database::setup_database(config).await?;
    let state = services::initialize_services(config, pool).await?;
    let router = routes::setup_routes(config, state.clone())?;

    Ok((state, router))
}
