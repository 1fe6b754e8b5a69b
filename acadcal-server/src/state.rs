use std::sync::Arc;

use acadcal_core::{FeedConfig, FeedFetcher};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FeedConfig>,
    // The feed is fetched fresh on every request; nothing is cached
    pub fetcher: Arc<dyn FeedFetcher>,
}

impl AppState {
    pub fn new(config: FeedConfig, fetcher: impl FeedFetcher + 'static) -> Self {
        AppState {
            config: Arc::new(config),
            fetcher: Arc::new(fetcher),
        }
    }
}
