//! Docs Gateway Library
//!
//! Edge gateway for a documentation site: answers moved docs pages with
//! permanent redirects, serves a placeholder for pages not written yet, and
//! forwards everything else to the page renderer.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::GatewayConfig;
pub use error::GatewayError;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
pub use routing::{Decision, RedirectPolicy};
