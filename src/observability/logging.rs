//! Structured logging.
//!
//! `RUST_LOG` takes precedence; otherwise the configured level applies to the
//! gateway and to tower-http's request traces.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::LogFormat;
use crate::config::ObservabilityConfig;

/// Install the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let level = &config.log_level;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("docs_gateway={level},tower_http={level}").into());

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.log_format {
        LogFormat::Full => registry.with(fmt::layer()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
    };

    if let Err(e) = result {
        eprintln!("tracing subscriber already installed: {e}");
    }
}
