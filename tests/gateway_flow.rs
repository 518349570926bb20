//! End-to-end tests: real listener, mock page renderer, reqwest client.

use std::time::Duration;

use docs_gateway::config::PolicyMode;

mod common;

#[tokio::test]
async fn test_paths_outside_docs_reach_renderer_untouched() {
    let upstream = common::start_echo_upstream().await;
    let gateway = common::start_gateway(common::config_for(upstream)).await;

    let res = common::client()
        .get(format!("http://{}/about?ref=home", gateway.addr))
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "upstream:/about?ref=home");

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_migrate_mode_redirect_over_the_wire() {
    let upstream = common::start_echo_upstream().await;
    let gateway = common::start_gateway(common::config_for(upstream)).await;

    let res = common::client()
        .get(format!("http://{}/docs/installation", gateway.addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 301);
    assert_eq!(
        res.headers()["location"],
        "https://docs.example.com/docs/1-getting-started/quick-start"
    );
    assert_eq!(
        res.headers()["cache-control"],
        "public, max-age=31536000, immutable"
    );

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_allow_list_serves_placeholder_at_original_url() {
    let upstream = common::start_echo_upstream().await;
    let mut config = common::config_for(upstream);
    config.docs.mode = PolicyMode::AllowList;
    let gateway = common::start_gateway(config).await;
    let client = common::client();

    let url = format!("http://{}/docs/unknown-page", gateway.addr);
    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.url().as_str(), url);
    assert_eq!(res.text().await.unwrap(), "upstream:/docs/coming-soon");

    for path in ["/docs/quick-start", "/docs", "/docs/coming-soon"] {
        let res = client
            .get(format!("http://{}{}", gateway.addr, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(res.text().await.unwrap(), format!("upstream:{}", path));
    }

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_rewrite_keeps_query_string() {
    let upstream = common::start_echo_upstream().await;
    let mut config = common::config_for(upstream);
    config.docs.mode = PolicyMode::AllowList;
    let gateway = common::start_gateway(config).await;

    let res = common::client()
        .get(format!("http://{}/docs/not-written?tab=cli", gateway.addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.text().await.unwrap(), "upstream:/docs/coming-soon?tab=cli");

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_renderer_down_is_bad_gateway() {
    let dead = common::closed_port().await;
    let gateway = common::start_gateway(common::config_for(dead)).await;

    let res = common::client()
        .get(format!("http://{}/pricing", gateway.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 502);

    // Redirects never touch the renderer
    let res = common::client()
        .get(format!("http://{}/docs/yolo-mode", gateway.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 301);

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_reload_switches_policy() {
    let upstream = common::start_echo_upstream().await;
    let config = common::config_for(upstream);
    let gateway = common::start_gateway(config.clone()).await;
    let client = common::client();
    let url = format!("http://{}/docs/unknown-page", gateway.addr);

    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), 301);

    let mut reloaded = config;
    reloaded.docs.mode = PolicyMode::AllowList;
    gateway.config_updates.send(reloaded).unwrap();

    // The swap happens on a background task
    let mut status = 0;
    for _ in 0..50 {
        status = client.get(&url).send().await.unwrap().status().as_u16();
        if status == 200 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(status, 200, "Policy should switch to allow-list after reload");

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let upstream = common::start_echo_upstream().await;
    let gateway = common::start_gateway(common::config_for(upstream)).await;

    gateway.shutdown.trigger();

    let result = tokio::time::timeout(Duration::from_secs(5), gateway.task)
        .await
        .expect("Server should stop after shutdown")
        .unwrap();
    assert!(result.is_ok());
}
