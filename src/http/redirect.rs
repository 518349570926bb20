//! Docs redirect middleware.
//! Applies the active redirect policy before any request reaches the renderer.

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Parts, PathAndQuery},
        Request, StatusCode, Uri,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::request::request_id_of;
use crate::http::response::permanent_redirect;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::Decision;

/// The client-visible URI of a request that was rewritten internally.
#[derive(Debug, Clone)]
pub struct RewrittenFrom(pub Uri);

pub async fn docs_redirect_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let policy = state.policy.load_full();
    let path = req.uri().path().to_string();
    let request_id = request_id_of(&req).to_string();

    let decision = policy.decide(&path);
    metrics::record_decision(decision.outcome());

    match decision {
        Decision::PassThrough => next.run(req).await,
        Decision::Redirect { location } => {
            tracing::debug!(
                request_id = %request_id,
                path = %path,
                location = %location,
                "Permanent redirect"
            );
            permanent_redirect(location)
        }
        Decision::Rewrite { path: target } => {
            let rewritten = match rewrite_uri(req.uri(), target) {
                Ok(uri) => uri,
                Err(e) => {
                    tracing::error!(request_id = %request_id, target = %target, error = %e, "Rewrite target is not a valid URI");
                    return (StatusCode::INTERNAL_SERVER_ERROR, "Invalid rewrite target").into_response();
                }
            };
            tracing::debug!(
                request_id = %request_id,
                path = %path,
                target = %target,
                "Rewriting request"
            );

            let original = std::mem::replace(req.uri_mut(), rewritten);
            req.extensions_mut().insert(RewrittenFrom(original));
            next.run(req).await
        }
    }
}

/// Swap the path of `uri` for `path`, keeping its query string.
pub fn rewrite_uri(uri: &Uri, path: &str) -> Result<Uri, axum::http::Error> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };

    let mut parts: Parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Ok(Uri::from_parts(parts)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_keeps_query() {
        let uri: Uri = "/docs/unknown-page?ref=nav".parse().unwrap();
        let rewritten = rewrite_uri(&uri, "/docs/coming-soon").unwrap();
        assert_eq!(rewritten, "/docs/coming-soon?ref=nav");
    }

    #[test]
    fn test_rewrite_absolute_form() {
        let uri: Uri = "http://site.example.com/docs/unknown-page".parse().unwrap();
        let rewritten = rewrite_uri(&uri, "/docs/coming-soon").unwrap();
        assert_eq!(rewritten.authority().map(|a| a.as_str()), Some("site.example.com"));
        assert_eq!(rewritten.path(), "/docs/coming-soon");
        assert!(rewritten.query().is_none());
    }
}
