//! Upstream feed retrieval.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;

use crate::config::FeedConfig;
use crate::error::{AcadCalError, AcadCalResult};

/// Source of the raw feed XML.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self) -> AcadCalResult<String>;
}

/// Fetches the feed over HTTP(S) with a bounded timeout. No retries.
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: reqwest::Client,
    url: Url,
}

impl HttpFeedFetcher {
    pub fn new(config: &FeedConfig) -> AcadCalResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AcadCalError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(HttpFeedFetcher {
            client,
            url: config.feed_url.clone(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self) -> AcadCalResult<String> {
        let started = Instant::now();
        info!(url = %self.url, "Fetching upstream feed");

        let result = async {
            let response = self.client.get(self.url.clone()).send().await?;
            let response = response.error_for_status()?;
            Ok::<_, reqwest::Error>(response.text().await?)
        }
        .await;

        match result {
            Ok(body) => {
                info!(
                    url = %self.url,
                    bytes = body.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Fetched upstream feed"
                );
                Ok(body)
            }
            Err(err) => {
                let err = AcadCalError::from(err);
                warn!(
                    url = %self.url,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %err,
                    "Upstream fetch failed"
                );
                Err(err)
            }
        }
    }
}

/// A feed whose XML is already in hand (a local file, a test fixture).
#[derive(Debug, Clone)]
pub struct StaticFeed {
    xml: String,
}

impl StaticFeed {
    pub fn new(xml: impl Into<String>) -> Self {
        StaticFeed { xml: xml.into() }
    }
}

#[async_trait]
impl FeedFetcher for StaticFeed {
    async fn fetch(&self) -> AcadCalResult<String> {
        Ok(self.xml.clone())
    }
}
