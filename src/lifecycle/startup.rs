//! Startup orchestration.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ConfigError, QuestConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("invalid address `{0}`")]
    Address(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serve the quest until `shutdown` triggers.
pub async fn serve(config: QuestConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let server = HttpServer::new(config)?;
    let config = server.config();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.security.max_body_size,
        redirect_chain = config.secrets.redirect_chain.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::Address(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}
