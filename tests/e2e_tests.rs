//! End-to-end HTTP tests: real server, wiremock upstream.

mod common;

use std::time::Duration;

use beststories::gateway::STATUS_HEADER;
use common::*;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::{method, path};

async fn fetch(server: &TestServer, route: &str) -> (u16, Option<String>, serde_json::Value) {
    let response = reqwest::get(server.url(route)).await.expect("request");
    let status = response.status().as_u16();
    let header = response
        .headers()
        .get(STATUS_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.json().await.unwrap_or(serde_json::Value::Null);
    (status, header, body)
}

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let upstream = MockServer::start().await;
    let server = spawn_server(config_for(&upstream)).await;

    let (status, header, body) = fetch(&server, "/healthz").await;

    assert_eq!(status, 200);
    assert_eq!(header.as_deref(), Some("healthy"));
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_top_two_returns_first_ids_in_order() {
    let upstream = MockServer::start().await;
    mount_ids(&upstream, &SCENARIO_IDS, 1).await;
    mount_item(&upstream, 21233041, 1757, 1).await;
    mount_item(&upstream, 21233229, 1500, 1).await;
    mount_item(&upstream, 21232873, 1200, 0).await;
    mount_item(&upstream, 21233237, 1100, 0).await;
    mount_item(&upstream, 21233211, 1000, 0).await;
    let server = spawn_server(config_for(&upstream)).await;

    let (status, header, body) = fetch(&server, "/api/beststories/2").await;

    assert_eq!(status, 200);
    assert_eq!(header.as_deref(), Some("ok"));
    assert_eq!(
        body,
        serde_json::json!([
            {
                "title": "Story 21233041",
                "uri": "https://example.com/21233041",
                "postedBy": "user21233041",
                "time": 1570887781,
                "score": 1757,
                "commentCount": 1
            },
            {
                "title": "Story 21233229",
                "uri": "https://example.com/21233229",
                "postedBy": "user21233229",
                "time": 1570887781,
                "score": 1500,
                "commentCount": 1
            }
        ])
    );
}

#[tokio::test]
async fn test_repeated_requests_are_served_from_cache() {
    let upstream = MockServer::start().await;
    mount_ids(&upstream, &SCENARIO_IDS, 1).await;
    for (rank, id) in SCENARIO_IDS.iter().enumerate() {
        mount_item(&upstream, *id, 100 - rank as i64, 1).await;
    }
    let server = spawn_server(config_for(&upstream)).await;

    let (_, _, first) = fetch(&server, "/api/beststories/5").await;
    let (_, _, second) = fetch(&server, "/api/beststories/5").await;
    let (_, _, prefix) = fetch(&server, "/api/beststories/3").await;

    assert_eq!(first, second);
    assert_eq!(first.as_array().map(Vec::len), Some(5));
    assert_eq!(prefix.as_array().map(|a| a.as_slice()), first.as_array().map(|a| &a[..3]));
    // Call counts are asserted by the `expect(1)` mounts when `upstream` drops.
}

#[tokio::test]
async fn test_failed_detail_is_omitted() {
    let upstream = MockServer::start().await;
    mount_ids(&upstream, &SCENARIO_IDS[..3], 1).await;
    mount_item(&upstream, SCENARIO_IDS[0], 30, 1).await;
    mount_item_status(&upstream, SCENARIO_IDS[1], 500).await;
    mount_item(&upstream, SCENARIO_IDS[2], 10, 1).await;
    let server = spawn_server(config_for(&upstream)).await;

    let (status, _, body) = fetch(&server, "/api/beststories/3").await;

    assert_eq!(status, 200);
    let titles: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|s| s["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Story 21233041", "Story 21232873"]);
}

#[tokio::test]
async fn test_rerank_orders_by_score() {
    let upstream = MockServer::start().await;
    mount_ids(&upstream, &SCENARIO_IDS, 1).await;
    let scores = [10, 50, 30, 500, 20];
    for (id, score) in SCENARIO_IDS.iter().zip(scores) {
        mount_item(&upstream, *id, score, 1).await;
    }
    let config = beststories::Config {
        force_rerank: true,
        ..config_for(&upstream)
    };
    let server = spawn_server(config).await;

    let (_, _, body) = fetch(&server, "/api/beststories/3").await;

    let got: Vec<i64> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|s| s["score"].as_i64())
        .collect();
    assert_eq!(got, vec![500, 50, 30]);
}

#[tokio::test]
async fn test_id_list_outage_is_bad_gateway() {
    let upstream = MockServer::start().await;
    wiremock::Mock::given(method("GET"))
        .and(path(IDS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&upstream)
        .await;
    let server = spawn_server(config_for(&upstream)).await;

    let (status, header, body) = fetch(&server, "/api/beststories/2").await;

    assert_eq!(status, 502);
    assert_eq!(header.as_deref(), Some("upstream_error"));
    assert_eq!(body["code"], 502);
}

#[tokio::test]
async fn test_invalid_count_is_bad_request() {
    let upstream = MockServer::start().await;
    let server = spawn_server(config_for(&upstream)).await;

    let (status, header, _) = fetch(&server, "/api/beststories/abc").await;

    assert_eq!(status, 400);
    assert_eq!(header.as_deref(), Some("invalid_request"));
}

#[tokio::test]
async fn test_slow_upstream_hits_request_timeout() {
    let upstream = MockServer::start().await;
    wiremock::Mock::given(method("GET"))
        .and(path(IDS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(SCENARIO_IDS)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&upstream)
        .await;
    let config = beststories::Config {
        request_timeout: Duration::from_millis(50),
        ..config_for(&upstream)
    };
    let server = spawn_server(config).await;

    let (status, header, _) = fetch(&server, "/api/beststories/2").await;

    assert_eq!(status, 504);
    assert_eq!(header.as_deref(), Some("timeout"));
}
