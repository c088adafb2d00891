//! # Data Sources
//!
//! Where collections get their records from. A source answers one
//! question: given a collection url, what records live there.

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use crate::app::models::{MOVIES_JSON, MOVIES_URL};

/// Asynchronous record provider for a collection url
pub trait DataSource<T> {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<T>>>;
}

/// Canned responses keyed by url, with an optional simulated latency
///
/// Stands in for a real backend during start-up and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticDataSource {
    responses: HashMap<String, String>,
    latency: Duration,
}

impl StaticDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source serving the built-in three-movie payload at `movies/`
    pub fn with_movies() -> Self {
        Self::new().mock(MOVIES_URL, MOVIES_JSON)
    }

    /// Serve `response_text` for `url`
    pub fn mock(mut self, url: impl Into<String>, response_text: impl Into<String>) -> Self {
        self.responses.insert(url.into(), response_text.into());
        self
    }

    /// Delay every response by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl<T: DeserializeOwned> DataSource<T> for StaticDataSource {
    async fn fetch(&self, url: &str) -> Result<Vec<T>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let body = self
            .responses
            .get(url)
            .ok_or_else(|| anyhow!("no response registered for '{url}' (404)"))?;

        tracing::debug!("Serving canned response for '{}'", url);
        serde_json::from_str(body).with_context(|| format!("invalid payload for '{url}'"))
    }
}

/// Records fetched over HTTP as a JSON array
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDataSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Absolute address for a collection url
    pub fn endpoint(&self, url: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }
}

impl<T: DeserializeOwned> DataSource<T> for HttpDataSource {
    async fn fetch(&self, url: &str) -> Result<Vec<T>> {
        let endpoint = self.endpoint(url);
        tracing::debug!("GET {}", endpoint);

        let response = self
            .client
            .get(&endpoint)
            .send()
            .await
            .with_context(|| format!("request to {endpoint} failed"))?
            .error_for_status()?;

        response
            .json::<Vec<T>>()
            .await
            .with_context(|| format!("invalid payload from {endpoint}"))
    }
}

/// Either source, picked at runtime from configuration
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Static(StaticDataSource),
    Http(HttpDataSource),
}

impl ConfiguredSource {
    /// HTTP when a base url is configured, otherwise the canned movies
    pub fn from_settings(source_url: Option<&str>, latency: Duration) -> Result<Self> {
        match source_url {
            Some(base_url) => Ok(Self::Http(HttpDataSource::new(base_url)?)),
            None => Ok(Self::Static(
                StaticDataSource::with_movies().with_latency(latency),
            )),
        }
    }
}

impl<T: DeserializeOwned> DataSource<T> for ConfiguredSource {
    async fn fetch(&self, url: &str) -> Result<Vec<T>> {
        match self {
            Self::Static(source) => source.fetch(url).await,
            Self::Http(source) => source.fetch(url).await,
        }
    }
}
