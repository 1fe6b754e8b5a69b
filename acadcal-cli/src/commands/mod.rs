pub mod events;
pub mod generate;

use std::path::Path;

use acadcal_core::{FeedConfig, FeedFetcher, HttpFeedFetcher, StaticFeed};
use anyhow::{Context, Result};
use tracing::info;

/// A local XML file when `--input` is given, otherwise the live feed.
pub fn feed_source(config: &FeedConfig, input: Option<&Path>) -> Result<Box<dyn FeedFetcher>> {
    match input {
        Some(path) => {
            let xml = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            info!(path = %path.display(), bytes = xml.len(), "Using local feed file");
            Ok(Box::new(StaticFeed::new(xml)))
        }
        None => Ok(Box::new(HttpFeedFetcher::new(config)?)),
    }
}
