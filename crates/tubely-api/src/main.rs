use tubely_api::{setup, telemetry};
use tubely_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Initialize the application (database, collaborators, routes)
    let (_state, router) = setup::initialize_app(&config).await?;

    // Start the server
    setup::server::start_server(&config, router).await?;

    Ok(())
}
