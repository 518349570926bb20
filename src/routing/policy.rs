//! Docs section redirect policy.
//!
//! # Responsibilities
//! - Decide pass-through / redirect / rewrite for a request path
//! - Apply exact rule matches before any fallback
//! - Apply the configured fallback for unmatched docs paths
//!
//! # Design Decisions
//! - Pure function of path + compiled tables: no I/O, no interior state
//! - Section membership is `prefix` or `prefix/...`; `/docsfoo` is outside
//! - In migrate mode the bare section root only moves if the table says so

use std::collections::HashSet;

use serde::Serialize;

use crate::config::{DocsConfig, PolicyMode};
use crate::routing::rules::{RedirectRule, RoutingError, RuleMode, RuleTable};

/// Outcome of a policy decision, borrowing from the policy tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Decision<'a> {
    /// Leave the request untouched.
    PassThrough,
    /// Answer with a permanent redirect to `location`.
    Redirect { location: &'a str },
    /// Serve the content of `path` at the original URL.
    Rewrite { path: &'a str },
}

/// Decision kind without payload, used as a metric/log label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    PassThrough,
    Redirect,
    Rewrite,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::PassThrough => "pass_through",
            Outcome::Redirect => "redirect",
            Outcome::Rewrite => "rewrite",
        }
    }
}

impl Decision<'_> {
    pub fn outcome(&self) -> Outcome {
        match self {
            Decision::PassThrough => Outcome::PassThrough,
            Decision::Redirect { .. } => Outcome::Redirect,
            Decision::Rewrite { .. } => Outcome::Rewrite,
        }
    }
}

#[derive(Debug, Clone)]
enum Fallback {
    Migrate {
        docs_root: String,
    },
    AllowList {
        allowed: HashSet<String>,
        placeholder: String,
    },
}

/// Compiled, immutable redirect policy for one docs section.
#[derive(Debug, Clone)]
pub struct RedirectPolicy {
    prefix: String,
    rules: RuleTable,
    fallback: Fallback,
}

impl RedirectPolicy {
    /// Compile the policy from validated docs configuration.
    pub fn from_config(config: &DocsConfig) -> Result<Self, RoutingError> {
        let rules = RuleTable::from_rules(
            config
                .effective_rules()
                .into_iter()
                .map(RedirectRule::from),
        )?;

        let fallback = match config.mode {
            PolicyMode::Migrate => Fallback::Migrate {
                docs_root: config.docs_root.trim_end_matches('/').to_string(),
            },
            PolicyMode::AllowList => Fallback::AllowList {
                allowed: config.effective_allow_list().into_iter().collect(),
                placeholder: config.fallback_path.clone(),
            },
        };

        Ok(Self {
            prefix: config.prefix.clone(),
            rules,
            fallback,
        })
    }

    /// Decide what happens to a request for `path`.
    pub fn decide(&self, path: &str) -> Decision<'_> {
        if !self.in_section(path) {
            return Decision::PassThrough;
        }

        if let Some(rule) = self.rules.lookup(path) {
            return match rule.mode {
                RuleMode::Redirect => Decision::Redirect {
                    location: &rule.destination,
                },
                RuleMode::Rewrite => Decision::Rewrite {
                    path: &rule.destination,
                },
            };
        }

        match &self.fallback {
            Fallback::Migrate { docs_root } => {
                if path == self.prefix {
                    Decision::PassThrough
                } else {
                    Decision::Redirect { location: docs_root }
                }
            }
            Fallback::AllowList {
                allowed,
                placeholder,
            } => {
                if path == self.prefix || path == placeholder.as_str() || allowed.contains(path) {
                    Decision::PassThrough
                } else {
                    Decision::Rewrite { path: placeholder }
                }
            }
        }
    }

    /// True when `path` is the section root or lies beneath it.
    pub fn in_section(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn mode(&self) -> PolicyMode {
        match self.fallback {
            Fallback::Migrate { .. } => PolicyMode::Migrate,
            Fallback::AllowList { .. } => PolicyMode::AllowList,
        }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Allow-listed pages, sorted. Empty in migrate mode.
    pub fn allowed_pages(&self) -> Vec<&str> {
        match &self.fallback {
            Fallback::Migrate { .. } => Vec::new(),
            Fallback::AllowList { allowed, .. } => {
                let mut pages: Vec<_> = allowed.iter().map(String::as_str).collect();
                pages.sort_unstable();
                pages
            }
        }
    }
}
