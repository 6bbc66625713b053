pub mod api;
pub mod config;
pub mod core_state;
pub mod intelligence;
pub mod models;
pub mod patients;
pub mod reference;
pub mod session;

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Reference(#[from] reference::ReferenceError),

    #[error("Server error: {0}")]
    Server(String),
}

/// Start the service and run until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let app_config = config::AppConfig::from_env()?;
    let reference = reference::ClinicalReferenceData::load(&app_config.data_dir)?;
    let core = Arc::new(core_state::CoreState::new(reference));

    let mut server = api::start_api_server(core, app_config.bind_addr)
        .await
        .map_err(StartupError::Server)?;

    tracing::info!(addr = %server.info.server_addr, "Ready");

    match tokio::signal::ctrl_c().await {
        Ok(()) => server.shutdown(),
        Err(e) => tracing::warn!("Failed to listen for Ctrl-C, serving until killed: {e}"),
    }

    server.wait().await;
    Ok(())
}
