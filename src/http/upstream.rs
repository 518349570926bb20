//! Forwarding to the page renderer.
//!
//! # Responsibilities
//! - Re-target passed-through and rewritten requests at the upstream origin
//! - Strip hop-by-hop headers in both directions
//! - Stream request and response bodies without buffering
//! - Map connection failures to 502 Bad Gateway

use std::time::{Duration, Instant};

use axum::{
    body::Body,
    http::{
        header::{self, HeaderMap, HeaderName},
        uri::{Authority, PathAndQuery, Scheme},
        Request, Uri, Version,
    },
    response::Response,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::UpstreamConfig;
use crate::error::GatewayError;
use crate::http::redirect::RewrittenFrom;
use crate::http::request::request_id_of;
use crate::http::response::bad_gateway;
use crate::observability::metrics;

const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-connection",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// HTTP client bound to a single upstream origin.
#[derive(Clone)]
pub struct Upstream {
    scheme: Scheme,
    authority: Authority,
    client: Client<HttpConnector, Body>,
}

impl Upstream {
    pub fn new(config: &UpstreamConfig) -> Result<Self, GatewayError> {
        let invalid = || GatewayError::InvalidUpstream(config.origin.clone());

        let uri: Uri = config.origin.parse().map_err(|_| invalid())?;
        let scheme = uri.scheme().cloned().ok_or_else(invalid)?;
        if scheme != Scheme::HTTP {
            return Err(invalid());
        }
        let authority = uri.authority().cloned().ok_or_else(invalid)?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            scheme,
            authority,
            client,
        })
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Send `request` to the upstream and relay its response.
    pub async fn forward(&self, request: Request<Body>) -> Response {
        let start_time = Instant::now();
        let request_id = request_id_of(&request).to_string();
        let rewritten_from = request
            .extensions()
            .get::<RewrittenFrom>()
            .map(|r| r.0.to_string());

        let (mut parts, body) = request.into_parts();
        parts.uri = self.target_uri(&parts.uri);
        parts.version = Version::HTTP_11;
        strip_hop_by_hop(&mut parts.headers);

        tracing::debug!(
            request_id = %request_id,
            method = %parts.method,
            uri = %parts.uri,
            rewritten_from = ?rewritten_from,
            "Forwarding request"
        );

        match self.client.request(Request::from_parts(parts, body)).await {
            Ok(response) => {
                metrics::record_upstream(response.status().as_u16(), start_time);
                let (mut parts, body) = response.into_parts();
                strip_hop_by_hop(&mut parts.headers);
                Response::from_parts(parts, Body::new(body))
            }
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    upstream = %self.authority,
                    error = %e,
                    "Upstream error"
                );
                metrics::record_upstream(502, start_time);
                bad_gateway()
            }
        }
    }

    fn target_uri(&self, uri: &Uri) -> Uri {
        let path_and_query = uri
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        let mut parts = axum::http::uri::Parts::default();
        parts.scheme = Some(self.scheme.clone());
        parts.authority = Some(self.authority.clone());
        parts.path_and_query = Some(path_and_query);

        // scheme, authority and path are all set, so from_parts cannot fail
        Uri::from_parts(parts).unwrap_or_else(|_| uri.clone())
    }
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    // Headers named by Connection are hop-by-hop too
    let named: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::try_from(name.trim()).ok())
        .collect();

    for name in &named {
        headers.remove(name);
    }
    for name in HOP_BY_HOP {
        headers.remove(*name);
    }
}
