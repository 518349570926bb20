//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → redirect.rs (docs policy: 301, rewrite, or pass)
//!     → upstream.rs (forward to the page renderer)
//!     → response.rs (gateway-generated responses)
//!     → Send to client
//! ```

pub mod redirect;
pub mod request;
pub mod response;
pub mod server;
pub mod upstream;

pub use redirect::RewrittenFrom;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::PERMANENT_CACHE_CONTROL;
pub use server::GatewayServer;
