//! Shared wiremock fixtures for the upstream-facing tests.

#![allow(dead_code)]

use beststories::{Config, HttpItemSource, ItemId};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const IDS_PATH: &str = "/v0/beststories.json";
pub const ITEM_PREFIX: &str = "/v0/item/";

pub const SCENARIO_IDS: [ItemId; 5] = [21233041, 21233229, 21232873, 21233237, 21233211];

pub fn item_path(id: ItemId) -> String {
    format!("{ITEM_PREFIX}{id}.json")
}

pub fn config_for(server: &MockServer) -> Config {
    Config {
        identifier_source_url: format!("{}{}", server.uri(), IDS_PATH),
        detail_source_url: format!("{}{}", server.uri(), ITEM_PREFIX),
        ..Config::default()
    }
}

pub fn source_for(server: &MockServer) -> HttpItemSource {
    HttpItemSource::from_config(&config_for(server)).expect("client builds")
}

pub fn story_json(id: ItemId, score: i64, kids: &[ItemId]) -> serde_json::Value {
    serde_json::json!({
        "by": format!("user{id}"),
        "descendants": kids.len(),
        "id": id,
        "kids": kids,
        "score": score,
        "time": 1570887781,
        "title": format!("Story {id}"),
        "type": "story",
        "url": format!("https://example.com/{id}")
    })
}

pub async fn mount_ids(server: &MockServer, ids: &[ItemId], expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(IDS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(ids))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub async fn mount_item(server: &MockServer, id: ItemId, score: i64, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(item_path(id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(story_json(id, score, &[id + 1])))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub async fn mount_item_status(server: &MockServer, id: ItemId, status: u16) {
    Mock::given(method("GET"))
        .and(path(item_path(id)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// A running server bound to an ephemeral local port.
pub struct TestServer {
    pub addr: std::net::SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_server(config: Config) -> TestServer {
    let source = std::sync::Arc::new(HttpItemSource::from_config(&config).expect("client builds"));
    let app = beststories::create_router(source, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestServer { addr, handle }
}
