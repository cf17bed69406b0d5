//! Live competitor feed provider.
//!
//! Fetches a JSON document with the same schema as the dashboard export
//! from a configured URL. Any failure (no URL, transport error, bad
//! status, malformed body) falls back to the demo dataset.
//!
//! Auth: optional bearer token, read from the env var named in
//! `[provider] api_key_env`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::demo::demo_dataset;
use super::DataProvider;
use crate::config::{AppConfig, ProviderConfig};
use crate::types::{CompetitorDataset, DashboardError};

const PROVIDER_NAME: &str = "feed";

pub struct FeedProvider {
    http: Client,
    feed_url: Option<String>,
    api_key: Option<SecretString>,
}

impl FeedProvider {
    pub fn new(feed_url: Option<String>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("competitor-intel/0.1.0")
            .build()
            .context("Failed to build feed HTTP client")?;
        Ok(Self {
            http,
            feed_url: feed_url.filter(|u| !u.trim().is_empty()),
            api_key: api_key.map(SecretString::new),
        })
    }

    /// Build from the `[provider]` config section. A missing key env var
    /// is not an error; the feed is then requested without auth.
    pub fn from_config(cfg: &ProviderConfig) -> Result<Self> {
        let api_key = cfg
            .api_key_env
            .as_deref()
            .and_then(|env| AppConfig::resolve_env(env).ok());
        Self::new(
            cfg.feed_url.clone(),
            api_key,
            Duration::from_secs(cfg.timeout_secs),
        )
    }

    pub fn is_live(&self) -> bool {
        self.feed_url.is_some()
    }

    /// Fetch and parse the live feed without falling back.
    pub async fn fetch_live(&self) -> Result<CompetitorDataset, DashboardError> {
        let url = self.feed_url.as_deref().ok_or_else(|| unavailable("no feed URL configured"))?;

        let mut request = self.http.get(url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let resp = request
            .send()
            .await
            .map_err(|e| unavailable(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(unavailable(format!("feed returned {status}")));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| unavailable(format!("failed to read body: {e}")))?;

        let dataset = CompetitorDataset::from_json(&body)
            .map_err(|e| unavailable(format!("malformed feed: {e}")))?;

        debug!(url, competitors = dataset.len(), "Feed parsed");
        Ok(dataset)
    }
}

fn unavailable(message: impl Into<String>) -> DashboardError {
    DashboardError::ProviderUnavailable {
        data_source: PROVIDER_NAME.to_string(),
        message: message.into(),
    }
}

#[async_trait]
impl DataProvider for FeedProvider {
    async fn fetch(&self) -> CompetitorDataset {
        if !self.is_live() {
            debug!("No feed configured, serving demo dataset");
            return demo_dataset();
        }

        match self.fetch_live().await {
            Ok(dataset) => {
                info!(competitors = dataset.len(), "Live competitor data loaded");
                dataset
            }
            Err(e) => {
                warn!(error = %e, "Live feed unavailable, falling back to demo dataset");
                demo_dataset()
            }
        }
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}
