//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging and metrics before traffic
//! - Bind the listener last (traffic only when ready)
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Running without a config file means running on validated defaults

use std::net::SocketAddr;
use std::path::Path;

use tokio::net::TcpListener;

use crate::config::validation::validate_config;
use crate::config::{load_config, ConfigError, GatewayConfig};
use crate::error::GatewayError;
use crate::observability::{logging, metrics};

/// Load the config file, or fall back to defaults when no path is given.
pub fn load_startup_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = GatewayConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}

/// Install logging and, when enabled, the metrics exporter.
pub fn init_observability(config: &GatewayConfig) {
    logging::init_logging(&config.observability);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }
}

pub async fn bind_listener(config: &GatewayConfig) -> Result<TcpListener, GatewayError> {
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");
    Ok(listener)
}
