//! Docs Gateway
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────────────┐
//!                     │                     DOCS GATEWAY                      │
//!                     │                                                       │
//!   Client Request    │  ┌──────────┐   ┌──────────┐   ┌──────────────────┐   │
//!   ──────────────────┼─▶│request id│──▶│  trace   │──▶│ docs redirect    │   │
//!                     │  │ timeout  │   │          │   │ middleware       │   │
//!                     │  └──────────┘   └──────────┘   └───┬──────────┬───┘   │
//!                     │                                    │          │       │
//!   301 + Location    │                  redirect          │          │ pass/ │
//!   ◀─────────────────┼────────────────────────────────────┘          │rewrite│
//!                     │                                               ▼       │
//!   Client Response   │                                      ┌─────────────┐  │
//!   ◀─────────────────┼──────────────────────────────────────│  upstream   │◀─┼── Page
//!                     │                                      │  forwarder  │  │   Renderer
//!                     │                                      └─────────────┘  │
//!                     └───────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc;

use docs_gateway::config::watcher::ConfigWatcher;
use docs_gateway::lifecycle::{signals, startup};
use docs_gateway::{GatewayServer, Shutdown};

#[derive(Parser)]
#[command(name = "docs-gateway")]
#[command(about = "Edge gateway applying the docs redirect policy in front of the site renderer", long_about = None)]
struct Args {
    /// Path to a TOML config file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload the redirect policy when the config file changes
    #[arg(long, requires = "config")]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = startup::load_startup_config(args.config.as_deref())?;
    startup::init_observability(&config);

    tracing::info!("docs-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.origin,
        mode = ?config.docs.mode,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // The watcher must outlive the server for reloads to keep arriving
    let (_watcher, config_updates) = match (&args.config, args.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = startup::bind_listener(&config).await?;
    let server = GatewayServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
