//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Build the HTTP server (header set, router)
//! - Bind the listener and serve until shutdown

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::{validate_config, AppConfig, ConfigError};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Validate `config`, bind, and serve until a termination signal.
pub async fn start(config: AppConfig) -> Result<(), StartupError> {
    validate_config(&config).map_err(ConfigError::Validation)?;

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    serve(config, shutdown_rx).await
}

/// Bind and serve until `shutdown` receives.
///
/// A signal sent before the listener is bound stays buffered in the
/// receiver, so the server stops right after starting.
pub async fn serve(
    config: AppConfig,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    let server = HttpServer::new(config)?;

    let address = server.config().server.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    server.run(listener, shutdown).await?;
    Ok(())
}
