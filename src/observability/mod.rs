//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Middleware and forwarder produce:
//!     → logging.rs (structured log events, request ID on every line)
//!     → metrics.rs (decision counters, upstream latency)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
