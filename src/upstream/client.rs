//! reqwest-backed [`ItemSource`].

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::ItemSource;
use super::error::{UpstreamError, UpstreamResult};
use super::model::RawItem;
use crate::config::Config;
use crate::model::ItemId;

/// Fetches the id list and item details over HTTP.
#[derive(Debug, Clone)]
pub struct HttpItemSource {
    client: reqwest::Client,
    ids_url: String,
    item_base_url: String,
}

impl HttpItemSource {
    /// Creates a source over an existing client.
    pub fn new(
        client: reqwest::Client,
        ids_url: impl Into<String>,
        item_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            ids_url: ids_url.into(),
            item_base_url: item_base_url.into(),
        }
    }

    /// Builds a client with the configured timeout and the configured URLs.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Self::build_client(config.upstream_timeout)?;
        Ok(Self::new(
            client,
            config.identifier_source_url.clone(),
            config.detail_source_url.clone(),
        ))
    }

    fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
    }

    /// URL of the Identifier Source.
    pub fn ids_url(&self) -> &str {
        &self.ids_url
    }

    /// Per-item URL: `{base}{id}.json`.
    pub fn item_url(&self, id: ItemId) -> String {
        format!("{}{}.json", self.item_base_url, id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> UpstreamResult<T> {
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|e| UpstreamError::Transport {
                    url: url.to_string(),
                    source: e,
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

impl ItemSource for HttpItemSource {
    #[instrument(skip(self), fields(url = %self.ids_url))]
    async fn best_ids(&self) -> UpstreamResult<Vec<ItemId>> {
        let ids: Vec<ItemId> = self.get_json(&self.ids_url).await?;
        debug!(count = ids.len(), "Fetched id list");
        Ok(ids)
    }

    #[instrument(skip(self))]
    async fn item(&self, id: ItemId) -> UpstreamResult<RawItem> {
        let url = self.item_url(id);
        self.get_json(&url).await
    }
}
