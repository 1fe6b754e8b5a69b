//! Validated configuration consumed by the pipeline.

use std::time::Duration;

use chrono_tz::Tz;
use serde::Deserialize;
use url::Url;

pub(crate) static DEFAULT_FEED_URL: &str =
    "https://registrar.gatech.edu/academiccalendar/current/data.xml";
pub(crate) static DEFAULT_CALENDAR_NAME: &str = "Academic Calendar";
pub(crate) static DEFAULT_TIMEZONE: &str = "America/New_York";
pub(crate) static DEFAULT_USER_AGENT: &str =
    concat!("acadcal/", env!("CARGO_PKG_VERSION"));
pub(crate) const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Product identifier triple rendered into the calendar's PRODID.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProdId {
    pub company: String,
    pub product: String,
    pub language: String,
}

impl Default for ProdId {
    fn default() -> Self {
        ProdId {
            company: "Rishov Sarkar".to_string(),
            product: "GT Academic Calendar Regenerator".to_string(),
            language: "EN".to_string(),
        }
    }
}

impl ProdId {
    /// Format as an RFC 5545 PRODID value, e.g. `-//Company//Product//EN`
    pub fn to_ics_value(&self) -> String {
        format!("-//{}//{}//{}", self.company, self.product, self.language)
    }
}

/// Everything the transformer and emitter need to know about the feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Upstream feed location, also the base for resolving relative links
    pub feed_url: Url,
    pub calendar_name: String,
    /// Civil timezone the feed's timestamps are displayed in
    pub timezone: Tz,
    pub prod_id: ProdId,
    pub fetch_timeout: Duration,
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            feed_url: Url::parse(DEFAULT_FEED_URL).expect("default feed URL is valid"),
            calendar_name: DEFAULT_CALENDAR_NAME.to_string(),
            timezone: chrono_tz::America::New_York,
            prod_id: ProdId::default(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FeedConfig {
    /// Same defaults, pointed at a different feed (used for mirrors and tests).
    pub fn with_feed_url(feed_url: Url) -> Self {
        FeedConfig {
            feed_url,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prod_id_value() {
        assert_eq!(
            ProdId::default().to_ics_value(),
            "-//Rishov Sarkar//GT Academic Calendar Regenerator//EN"
        );
    }

    #[test]
    fn test_default_feed_config() {
        let config = FeedConfig::default();
        assert_eq!(config.feed_url.as_str(), DEFAULT_FEED_URL);
        assert_eq!(config.timezone.name(), DEFAULT_TIMEZONE);
        assert_eq!(config.fetch_timeout, Duration::from_secs(15));
    }
}
