//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::builtin;
use crate::routing::rules::RuleMode;

/// Root configuration for the docs gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Page renderer that receives passed-through and rewritten requests.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Documentation section redirect policy.
    pub docs: DocsConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream page renderer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Origin of the renderer (e.g., "http://127.0.0.1:3000").
    pub origin: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            origin: "http://127.0.0.1:3000".to_string(),
            connect_timeout_secs: 5,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Full,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Which fallback policy applies to docs paths missing from the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PolicyMode {
    /// Every docs path moves to the external documentation host.
    #[default]
    Migrate,
    /// Known local pages pass; everything else gets the placeholder page.
    AllowList,
}

/// A single exact-match rule as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleConfig {
    /// Exact request path.
    pub source: String,

    /// Absolute URL (redirect) or local path (rewrite).
    pub destination: String,

    #[serde(default)]
    pub mode: RuleMode,
}

/// Documentation section configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocsConfig {
    pub mode: PolicyMode,

    /// Reserved section prefix, without trailing slash.
    ///
    /// The builtin migration table only covers `/docs`, so in migrate mode a
    /// different prefix needs explicit `rules`.
    pub prefix: String,

    /// Root of the external documentation host.
    pub docs_root: String,

    /// Local placeholder page for docs that are not written yet.
    pub fallback_path: String,

    /// Exact-match rules. Falls back to the builtin table for `mode` when absent.
    pub rules: Option<Vec<RuleConfig>>,

    /// Local pages that exist. Falls back to the builtin list when absent.
    pub allow_list: Option<Vec<String>>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            mode: PolicyMode::Migrate,
            prefix: builtin::DOCS_PREFIX.to_string(),
            docs_root: builtin::DOCS_ROOT.to_string(),
            fallback_path: builtin::COMING_SOON_PATH.to_string(),
            rules: None,
            allow_list: None,
        }
    }
}

impl DocsConfig {
    /// Rules in effect: configured ones, or the builtin table for the mode.
    pub fn effective_rules(&self) -> Vec<RuleConfig> {
        match (&self.rules, self.mode) {
            (Some(rules), _) => rules.clone(),
            (None, PolicyMode::Migrate) => builtin::migration_rules(&self.docs_root),
            (None, PolicyMode::AllowList) => Vec::new(),
        }
    }

    /// Allow-list in effect: configured entries, or the builtin page list.
    pub fn effective_allow_list(&self) -> Vec<String> {
        match &self.allow_list {
            Some(pages) => pages.clone(),
            None => builtin::local_pages(),
        }
    }
}
