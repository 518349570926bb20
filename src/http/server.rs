//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding handler
//! - Wire up middleware (request ID, tracing, timeout, body limit, docs redirect)
//! - Bind server to listener
//! - Swap in recompiled redirect policies on config reload
//! - Drain in-flight requests on shutdown

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::validation::validate_config;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::http::redirect::docs_redirect_middleware;
use crate::http::request::UuidRequestId;
use crate::http::upstream::Upstream;
use crate::routing::RedirectPolicy;

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub policy: Arc<ArcSwap<RedirectPolicy>>,
    pub upstream: Arc<Upstream>,
}

/// HTTP server for the docs gateway.
pub struct GatewayServer {
    router: Router,
    state: AppState,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let policy = RedirectPolicy::from_config(&config.docs)?;
        let upstream = Upstream::new(&config.upstream)?;

        tracing::info!(
            mode = ?policy.mode(),
            prefix = %policy.prefix(),
            rules = policy.rules().len(),
            upstream = %upstream.authority(),
            "Redirect policy compiled"
        );

        let state = AppState {
            policy: Arc::new(ArcSwap::from_pointee(policy)),
            upstream: Arc::new(upstream),
        };

        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            state,
            config,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(forward_handler))
            .route("/", any(forward_handler))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                docs_redirect_middleware,
            ))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The fully layered router, for serving or driving with `tower::ServiceExt`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The currently active redirect policy.
    pub fn policy(&self) -> Arc<RedirectPolicy> {
        self.state.policy.load_full()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configs received on `config_updates` replace the redirect policy; other
    /// sections only take effect on restart.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<GatewayConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let policy = self.state.policy.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                apply_reload(&policy, &config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn apply_reload(policy: &ArcSwap<RedirectPolicy>, config: &GatewayConfig) {
    if let Err(errors) = validate_config(config) {
        for error in &errors {
            tracing::error!(error = %error, "Rejected config reload");
        }
        return;
    }

    match RedirectPolicy::from_config(&config.docs) {
        Ok(next) => {
            tracing::info!(
                mode = ?next.mode(),
                rules = next.rules().len(),
                "Redirect policy reloaded"
            );
            policy.store(Arc::new(next));
        }
        Err(e) => tracing::error!(error = %e, "Failed to compile reloaded policy, keeping current"),
    }
}

/// Terminal handler: everything the redirect middleware lets through goes upstream.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    state.upstream.forward(request).await
}
