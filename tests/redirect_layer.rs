//! Drives the layered router in-process with `tower::ServiceExt::oneshot`.
//! Only paths that end in a gateway-generated response are exercised here.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use docs_gateway::config::PolicyMode;
use docs_gateway::http::{PERMANENT_CACHE_CONTROL, X_REQUEST_ID};
use docs_gateway::{GatewayConfig, GatewayServer};
use tower::ServiceExt;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_mapped_path_redirects_permanently() {
    let server = GatewayServer::new(GatewayConfig::default()).unwrap();

    let res = server.router().oneshot(get("/docs/installation")).await.unwrap();

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        res.headers()[header::LOCATION],
        "https://docs.example.com/docs/1-getting-started/quick-start"
    );
    assert_eq!(res.headers()[header::CACHE_CONTROL], PERMANENT_CACHE_CONTROL);
}

#[tokio::test]
async fn test_unmapped_docs_path_redirects_to_docs_root() {
    let server = GatewayServer::new(GatewayConfig::default()).unwrap();

    for path in ["/docs/unknown-page", "/docs/installation/", "/docs/a/b/c?x=1"] {
        let res = server.router().oneshot(get(path)).await.unwrap();
        assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY, "path {path}");
        assert_eq!(res.headers()[header::LOCATION], "https://docs.example.com");
        assert_eq!(res.headers()[header::CACHE_CONTROL], PERMANENT_CACHE_CONTROL);
    }
}

#[tokio::test]
async fn test_redirect_carries_request_id() {
    let server = GatewayServer::new(GatewayConfig::default()).unwrap();

    let res = server.router().oneshot(get("/docs/yolo-mode")).await.unwrap();
    assert!(res.headers().contains_key(X_REQUEST_ID));

    let req = Request::builder()
        .uri("/docs/yolo-mode")
        .header(X_REQUEST_ID, "client-chosen-id")
        .body(Body::empty())
        .unwrap();
    let res = server.router().oneshot(req).await.unwrap();
    assert_eq!(res.headers()[X_REQUEST_ID], "client-chosen-id");
}

#[tokio::test]
async fn test_same_request_same_decision() {
    let server = GatewayServer::new(GatewayConfig::default()).unwrap();

    let first = server.router().oneshot(get("/docs/caching")).await.unwrap();
    let second = server.router().oneshot(get("/docs/caching")).await.unwrap();

    assert_eq!(first.status(), second.status());
    assert_eq!(first.headers()[header::LOCATION], second.headers()[header::LOCATION]);
}

#[tokio::test]
async fn test_allow_list_mode_redirects_only_configured_rules() {
    let mut config: GatewayConfig = toml::from_str(
        r#"
        [docs]
        mode = "allow_list"

        [[docs.rules]]
        source = "/docs/api"
        destination = "https://api-docs.example.com/"
        "#,
    )
    .unwrap();
    config.upstream.origin = "http://127.0.0.1:3000".into();
    let server = GatewayServer::new(config).unwrap();
    assert_eq!(server.policy().mode(), PolicyMode::AllowList);

    let res = server.router().oneshot(get("/docs/api")).await.unwrap();
    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()[header::LOCATION], "https://api-docs.example.com/");
}
