//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → policy.rs (section test, exact rule lookup, fallback)
//!     → rules.rs (exact-match table)
//!     → Return: PassThrough | Redirect | Rewrite
//!
//! Policy Compilation (at startup and on reload):
//!     DocsConfig (or builtin.rs tables)
//!     → RuleTable (duplicates rejected)
//!     → Freeze as immutable RedirectPolicy
//! ```
//!
//! # Design Decisions
//! - Policy compiled up front, immutable at runtime
//! - Exact matching only, plus one prefix test for section membership
//! - Deterministic: same path always yields the same decision

pub mod builtin;
pub mod policy;
pub mod rules;

pub use policy::{Decision, Outcome, RedirectPolicy};
pub use rules::{RedirectRule, RoutingError, RuleMode, RuleTable};
