//! Top-level error type for building and running the gateway.

use crate::config::ConfigError;
use crate::routing::RoutingError;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error("invalid upstream origin: {0}")]
    InvalidUpstream(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
