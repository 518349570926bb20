//! Compiled-in documentation tables.
//!
//! These are the deploy-time defaults. A config file may replace either table
//! through `docs.rules` / `docs.allow_list`. The sidebar page list also
//! drives previous/next navigation.

use serde::Serialize;

use crate::config::RuleConfig;
use crate::routing::rules::RuleMode;

pub const DOCS_PREFIX: &str = "/docs";
pub const DOCS_ROOT: &str = "https://docs.example.com";
pub const COMING_SOON_PATH: &str = "/docs/coming-soon";

/// Old local docs path → page on the external docs host (relative to its root).
const MIGRATION_MAP: &[(&str, &str)] = &[
    ("/docs", ""),
    ("/docs/installation", "/docs/1-getting-started/quick-start"),
    ("/docs/prerequisites", "/docs/1-getting-started/quick-start"),
    ("/docs/authentication", "/docs/1-getting-started/quick-start"),
    ("/docs/quick-start", "/docs/1-getting-started/quick-start"),
    ("/docs/standard-mode", "/docs/2-usage/standard-mode"),
    ("/docs/yolo-mode", "/docs/2-usage/yolo-mode"),
    ("/docs/environment-variables", "/docs/3-configuration/options"),
    ("/docs/credentials-management", "/docs/3-configuration/options"),
    ("/docs/repository-detection", "/docs/3-configuration/options"),
    ("/docs/caching", "/docs/3-configuration/options"),
    ("/docs/github-oauth-configuration", "/docs/3-configuration/options"),
    ("/docs/configuration-options", "/docs/3-configuration/options"),
    ("/docs/using-with-cicd", "/docs/4-advanced-usage/cicd"),
    ("/docs/filtering-commits", "/docs/4-advanced-usage/filters"),
    ("/docs/cache-management", "/docs/4-advanced-usage/cache"),
    ("/docs/common-issues", "/docs/6-troubleshooting/common-issues"),
    ("/docs/nodejs-deprecation-warnings", "/docs/6-troubleshooting/common-issues"),
    ("/docs/github-api-rate-limits", "/docs/6-troubleshooting/common-issues"),
    ("/docs/git-operation-errors", "/docs/6-troubleshooting/common-issues"),
    ("/docs/command-line-reference", "/docs/5-reference/commands"),
    ("/docs/api-reference", "/docs/5-reference/api"),
];

/// A page in the docs sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub title: &'static str,
    pub href: &'static str,
}

const fn page(title: &'static str, href: &'static str) -> Page {
    Page { title, href }
}

/// Sidebar order. The section root comes first, then the pages that exist
/// on the local site.
const NAV_PAGES: &[Page] = &[
    page("Introduction", DOCS_PREFIX),
    page("Prerequisites", "/docs/prerequisites"),
    page("Installation", "/docs/installation"),
    page("Authentication", "/docs/authentication"),
    page("Quick Start", "/docs/quick-start"),
    page("Standard Mode", "/docs/standard-mode"),
    page("YOLO Mode", "/docs/yolo-mode"),
    page("Configuration Options", "/docs/configuration-options"),
    page("Environment Variables", "/docs/environment-variables"),
    page("Credentials Management", "/docs/credentials-management"),
    page("Repository Detection", "/docs/repository-detection"),
    page("Caching", "/docs/caching"),
    page("GitHub OAuth", "/docs/github-oauth-configuration"),
    page("CI/CD Integration", "/docs/using-with-cicd"),
    page("Filtering Commits", "/docs/filtering-commits"),
    page("Cache Management", "/docs/cache-management"),
    page("Common Issues", "/docs/common-issues"),
    page("Node.js Deprecation Warnings", "/docs/nodejs-deprecation-warnings"),
    page("GitHub API Rate Limits", "/docs/github-api-rate-limits"),
    page("Git Operation Errors", "/docs/git-operation-errors"),
    page("Command Line Reference", "/docs/command-line-reference"),
    page("API Reference", "/docs/api-reference"),
];

/// Redirect rules moving every old docs page to the external host at `docs_root`.
pub fn migration_rules(docs_root: &str) -> Vec<RuleConfig> {
    let root = docs_root.trim_end_matches('/');
    MIGRATION_MAP
        .iter()
        .map(|(source, page)| RuleConfig {
            source: (*source).to_string(),
            destination: format!("{root}{page}"),
            mode: RuleMode::Redirect,
        })
        .collect()
}

/// Docs pages that exist on the local site, in sidebar order.
pub fn local_pages() -> Vec<String> {
    NAV_PAGES
        .iter()
        .filter(|p| p.href != DOCS_PREFIX)
        .map(|p| p.href.to_string())
        .collect()
}

/// Previous and next sidebar pages around `path`.
///
/// Paths that are not in the sidebar, the placeholder included, have neither.
pub fn navigation(path: &str) -> (Option<Page>, Option<Page>) {
    match NAV_PAGES.iter().position(|p| p.href == path) {
        Some(i) => (
            i.checked_sub(1).map(|prev| NAV_PAGES[prev]),
            NAV_PAGES.get(i + 1).copied(),
        ),
        None => (None, None),
    }
}
