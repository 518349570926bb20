//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every docs rule and allow-list entry lives in the docs section
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect duplicate rule sources
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::{uri::PathAndQuery, HeaderValue};
use url::Url;

use crate::config::schema::{DocsConfig, GatewayConfig, PolicyMode};
use crate::routing::builtin;
use crate::routing::rules::RuleMode;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: must be greater than zero")]
    ZeroValue { field: &'static str },

    #[error("upstream.origin: {0:?} is not an absolute http:// URL")]
    InvalidUpstream(String),

    #[error("docs.prefix: {0:?} must start with '/', not end with '/', and not be the site root")]
    InvalidPrefix(String),

    #[error("docs.docs_root: {0:?} is not an absolute http(s) URL")]
    InvalidDocsRoot(String),

    #[error("docs.fallback_path: {0:?} is not beneath the docs prefix")]
    FallbackOutsideSection(String),

    #[error("docs.rules: source {0:?} is outside the docs section")]
    RuleOutsideSection(String),

    #[error("docs.rules: builtin rules only cover {builtin:?}; prefix {0:?} needs explicit docs.rules", builtin = builtin::DOCS_PREFIX)]
    BuiltinRulesNeedDefaultPrefix(String),

    #[error("docs.rules: source {0:?} appears more than once")]
    DuplicateSource(String),

    #[error("docs.rules: redirect for {rule:?} needs an absolute http(s) URL, got {destination:?}")]
    InvalidRedirectTarget { rule: String, destination: String },

    #[error("docs.rules: rewrite for {rule:?} needs a local path, got {destination:?}")]
    InvalidRewriteTarget { rule: String, destination: String },

    #[error("docs.rules: rewrite for {0:?} points at itself")]
    SelfRewrite(String),

    #[error("docs.allow_list: {0:?} is outside the docs section")]
    AllowListOutsideSection(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    match Url::parse(&config.upstream.origin) {
        Ok(url) if url.scheme() == "http" && url.has_host() => {}
        _ => errors.push(ValidationError::InvalidUpstream(config.upstream.origin.clone())),
    }
    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue { field: "upstream.connect_timeout_secs" });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroValue { field: "timeouts.request_secs" });
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroValue { field: "limits.max_body_bytes" });
    }

    validate_docs(&mut errors, &config.docs);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_docs(errors: &mut Vec<ValidationError>, docs: &DocsConfig) {
    let prefix = docs.prefix.as_str();
    if !prefix.starts_with('/') || prefix.ends_with('/') {
        errors.push(ValidationError::InvalidPrefix(docs.prefix.clone()));
    }

    if !is_absolute_web_url(&docs.docs_root) {
        errors.push(ValidationError::InvalidDocsRoot(docs.docs_root.clone()));
    }

    if !is_beneath(prefix, &docs.fallback_path) {
        errors.push(ValidationError::FallbackOutsideSection(docs.fallback_path.clone()));
    }

    let rules = if docs.rules.is_none()
        && docs.mode == PolicyMode::Migrate
        && prefix != builtin::DOCS_PREFIX
    {
        errors.push(ValidationError::BuiltinRulesNeedDefaultPrefix(docs.prefix.clone()));
        Vec::new()
    } else {
        docs.effective_rules()
    };

    let mut seen = HashSet::new();
    for rule in rules {
        if !is_in_section(prefix, &rule.source) {
            errors.push(ValidationError::RuleOutsideSection(rule.source.clone()));
        }
        if !seen.insert(rule.source.clone()) {
            errors.push(ValidationError::DuplicateSource(rule.source.clone()));
        }
        match rule.mode {
            RuleMode::Redirect if !is_redirect_target(&rule.destination) => {
                errors.push(ValidationError::InvalidRedirectTarget {
                    rule: rule.source.clone(),
                    destination: rule.destination.clone(),
                });
            }
            RuleMode::Rewrite if !is_rewrite_target(&rule.destination) => {
                errors.push(ValidationError::InvalidRewriteTarget {
                    rule: rule.source.clone(),
                    destination: rule.destination.clone(),
                });
            }
            RuleMode::Rewrite if rule.destination == rule.source => {
                errors.push(ValidationError::SelfRewrite(rule.source.clone()));
            }
            _ => {}
        }
    }

    if let Some(pages) = &docs.allow_list {
        for page in pages {
            if !is_in_section(prefix, page) {
                errors.push(ValidationError::AllowListOutsideSection(page.clone()));
            }
        }
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn is_absolute_web_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

/// Must survive as a `Location` header, not just parse as a URL.
fn is_redirect_target(value: &str) -> bool {
    is_absolute_web_url(value) && HeaderValue::from_str(value).is_ok()
}

/// Must be a local path the request URI can be rebuilt with.
fn is_rewrite_target(value: &str) -> bool {
    value.starts_with('/') && PathAndQuery::try_from(value).is_ok()
}

fn is_in_section(prefix: &str, path: &str) -> bool {
    path == prefix || is_beneath(prefix, path)
}

fn is_beneath(prefix: &str, path: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('/'))
}
