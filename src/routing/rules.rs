//! Exact-match rule table.
//!
//! # Responsibilities
//! - Hold the compiled `source → rule` map
//! - Reject duplicate sources at build time
//! - Answer exact-match lookups
//!
//! # Design Decisions
//! - Exact matching only: no patterns, no trailing-slash folding
//! - Immutable after construction (thread-safe without locks)
//! - O(1) lookup via HashMap

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::RuleConfig;

/// How a matching rule is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RuleMode {
    /// 301 to the destination, visible to the client.
    #[default]
    Redirect,
    /// Serve the destination's content at the original URL.
    Rewrite,
}

/// A compiled rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectRule {
    pub source: String,
    pub destination: String,
    pub mode: RuleMode,
}

impl From<RuleConfig> for RedirectRule {
    fn from(rule: RuleConfig) -> Self {
        Self {
            source: rule.source,
            destination: rule.destination,
            mode: rule.mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    #[error("duplicate rule source: {0}")]
    DuplicateSource(String),
}

/// Immutable exact-match lookup table keyed by request path.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<String, RedirectRule>,
}

impl RuleTable {
    /// Build a table, failing on the first repeated source.
    pub fn from_rules<I>(rules: I) -> Result<Self, RoutingError>
    where
        I: IntoIterator<Item = RedirectRule>,
    {
        let mut map = HashMap::new();
        for rule in rules {
            if map.contains_key(&rule.source) {
                return Err(RoutingError::DuplicateSource(rule.source));
            }
            map.insert(rule.source.clone(), rule);
        }
        Ok(Self { rules: map })
    }

    pub fn lookup(&self, path: &str) -> Option<&RedirectRule> {
        self.rules.get(path)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules sorted by source, for stable listings.
    pub fn iter_sorted(&self) -> Vec<&RedirectRule> {
        let mut rules: Vec<_> = self.rules.values().collect();
        rules.sort_by(|a, b| a.source.cmp(&b.source));
        rules
    }
}
