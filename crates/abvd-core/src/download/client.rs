use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};
use reqwest::Client;
use tracing::{debug, info};

use crate::config::{DownloadConfig, DEFAULT_BASE_URL};
use crate::document::{parse_document, Document};

use super::{Collection, DownloadError};

/// Transport used by [`Downloader`].
///
/// Abstracted so the request side can be swapped (HTTP, fixtures).
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the body behind a URL.
    async fn fetch(&self, url: &str) -> Result<String, DownloadError>;
}

/// reqwest-backed [`Fetcher`].
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, DownloadError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, DownloadError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Fetches language documents from one collection.
pub struct Downloader {
    collection: Collection,
    base_url: String,
    fetcher: Arc<dyn Fetcher>,
}

impl Downloader {
    /// Creates a downloader for the public export endpoint.
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            base_url: DEFAULT_BASE_URL.to_string(),
            fetcher: Arc::new(HttpFetcher::default()),
        }
    }

    /// Creates a downloader using the configured endpoint and timeout.
    pub fn from_config(
        collection: Collection,
        config: &DownloadConfig,
    ) -> Result<Self, DownloadError> {
        Ok(Self {
            collection,
            base_url: config.base_url.clone(),
            fetcher: Arc::new(HttpFetcher::with_timeout(config.timeout())?),
        })
    }

    /// Sets the URL template (`{db}` and `{id}` placeholders).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replaces the transport.
    pub fn with_fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Arc::new(fetcher);
        self
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Builds the export URL for a language.
    pub fn make_url(&self, language_id: u32) -> String {
        self.base_url
            .replace("{db}", self.collection.as_str())
            .replace("{id}", &language_id.to_string())
    }

    /// Rejects languages that were removed from the collection.
    pub fn check_language(&self, language_id: u32) -> Result<u32, DownloadError> {
        if self.collection.is_dead(language_id) {
            return Err(DownloadError::DeadLanguage(language_id));
        }
        Ok(language_id)
    }

    /// Fetches the raw XML export of a language.
    ///
    /// An empty body (or a literal `null`) means the id is not in use.
    pub async fn fetch_raw(&self, language_id: u32) -> Result<String, DownloadError> {
        let language_id = self.check_language(language_id)?;
        let url = self.make_url(language_id);
        debug!(%url, "fetching language");

        let body = self.fetcher.fetch(&url).await?;
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(DownloadError::InvalidLanguage(language_id));
        }

        Ok(body)
    }

    /// Fetches and parses a language document.
    pub async fn get(&self, language_id: u32) -> Result<Document, DownloadError> {
        let body = self.fetch_raw(language_id).await?;
        let document = parse_document(&body)?;
        info!(
            collection = %self.collection,
            language_id,
            entries = document.lexicon.len(),
            "downloaded language"
        );
        Ok(document)
    }

    /// Fetches many languages with at most `concurrency` requests in flight.
    ///
    /// Results arrive in completion order.
    pub fn fetch_stream(
        &self,
        language_ids: Vec<u32>,
        concurrency: usize,
    ) -> impl Stream<Item = (u32, Result<String, DownloadError>)> + '_ {
        stream::iter(language_ids)
            .map(move |id| async move { (id, self.fetch_raw(id).await) })
            .buffer_unordered(concurrency.max(1))
    }

    /// Collects [`Downloader::fetch_stream`] into per-id outcomes.
    pub async fn fetch_many(
        &self,
        language_ids: Vec<u32>,
        concurrency: usize,
    ) -> Vec<(u32, Result<String, DownloadError>)> {
        self.fetch_stream(language_ids, concurrency).collect().await
    }
}
