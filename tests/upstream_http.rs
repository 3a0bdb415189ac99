//! `HttpItemSource` against a wiremock upstream.

mod common;

use beststories::{ItemSource, UpstreamError};
use common::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_best_ids_parses_array_in_order() {
    let server = MockServer::start().await;
    mount_ids(&server, &SCENARIO_IDS, 1).await;

    let ids = source_for(&server).best_ids().await.expect("ids");

    assert_eq!(ids, SCENARIO_IDS.to_vec());
}

#[tokio::test]
async fn test_best_ids_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(IDS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = source_for(&server).best_ids().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Status { status: 503, .. }));
}

#[tokio::test]
async fn test_best_ids_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(IDS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\":\"an array\"}"))
        .mount(&server)
        .await;

    let err = source_for(&server).best_ids().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Decode { .. }));
    assert!(err.to_string().contains(IDS_PATH));
}

#[tokio::test]
async fn test_item_fetched_from_per_id_url() {
    let server = MockServer::start().await;
    mount_item(&server, 21233041, 1757, 1).await;

    let source = source_for(&server);
    assert!(source.item_url(21233041).ends_with("/v0/item/21233041.json"));

    let raw = source.item(21233041).await.expect("item");

    assert_eq!(raw.id, 21233041);
    assert_eq!(raw.by.as_deref(), Some("user21233041"));
    assert_eq!(raw.score, Some(1757));
    assert_eq!(raw.kids, Some(vec![21233042]));
    assert_eq!(raw.kind.as_deref(), Some("story"));
}

#[tokio::test]
async fn test_item_not_found_status() {
    let server = MockServer::start().await;
    mount_item_status(&server, 7, 404).await;

    let err = source_for(&server).item(7).await.unwrap_err();

    assert!(matches!(err, UpstreamError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_item_null_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(item_path(99)))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let err = source_for(&server).item(99).await.unwrap_err();

    assert!(matches!(err, UpstreamError::Decode { .. }));
}

#[tokio::test]
async fn test_unreachable_upstream_is_transport_error() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    drop(server);

    let source = beststories::HttpItemSource::from_config(&config).expect("client");
    let err = source.best_ids().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Transport { .. }));
}
