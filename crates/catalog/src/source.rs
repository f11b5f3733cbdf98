//! Event sources
//!
//! `HttpEventSource` queries the public events endpoint. `FixtureEventSource`
//! answers from a local JSON file, for offline runs and tests.

use crate::error::CatalogError;
use crate::model::{decode_results, SearchResults};
use crate::query::SearchQuery;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Anything that can answer a search query with a result set
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> crate::Result<SearchResults>;
}

/// HTTP endpoint settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub base_url: String,
    pub client_id: Option<String>,
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.seatgeek.com/2/events".to_string(),
            client_id: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Search over HTTP
pub struct HttpEventSource {
    client: reqwest::Client,
    config: SourceConfig,
}

impl HttpEventSource {
    pub fn new(config: SourceConfig) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }
}

#[async_trait]
impl EventSource for HttpEventSource {
    async fn search(&self, query: &SearchQuery) -> crate::Result<SearchResults> {
        let url = query.build_url(&self.config.base_url, self.config.client_id.as_deref())?;

        info!(query = %query.text(), "searching events");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let results = decode_results(&body)?;
        debug!(count = results.len(), "search results decoded");
        Ok(results)
    }
}

/// Search over a fixed result set
///
/// Events match when their title contains the query, ignoring case. An
/// empty query matches everything.
pub struct FixtureEventSource {
    results: SearchResults,
}

impl FixtureEventSource {
    pub fn new(results: SearchResults) -> Self {
        Self { results }
    }

    /// Load a saved API response
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let body = std::fs::read(path)?;
        Ok(Self::new(decode_results(&body)?))
    }
}

#[async_trait]
impl EventSource for FixtureEventSource {
    async fn search(&self, query: &SearchQuery) -> crate::Result<SearchResults> {
        let needle = query.text().to_lowercase();

        let events = self
            .results
            .events
            .iter()
            .filter(|event| {
                needle.is_empty()
                    || event
                        .title
                        .as_deref()
                        .map(|title| title.to_lowercase().contains(&needle))
                        .unwrap_or(false)
            })
            .cloned()
            .collect();

        Ok(SearchResults { events })
    }
}
