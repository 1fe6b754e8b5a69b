//! Layered settings: built-in defaults, optional `acadcal.toml`, then
//! `ACADCAL_*` environment variables (`__` separates nested keys, e.g.
//! `ACADCAL_FEED__URL`, `ACADCAL_SERVER__PORT`).

use std::time::Duration;

use chrono_tz::Tz;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use url::Url;

use super::feed_config::{
    DEFAULT_CALENDAR_NAME, DEFAULT_FEED_URL, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_TIMEZONE,
    DEFAULT_USER_AGENT, FeedConfig, ProdId,
};
use crate::error::{AcadCalError, AcadCalResult};

static CONFIG_FILE_NAME: &str = "acadcal";
static ENV_PREFIX: &str = "ACADCAL";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub feed: FeedSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

/// Raw feed settings, validated into a [`FeedConfig`] by [`Settings::feed_config`].
#[derive(Debug, Clone, Deserialize)]
pub struct FeedSettings {
    pub url: String,
    pub calendar_name: String,
    pub timezone: String,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    pub prod_id: ProdId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    /// Bind address in `host:port` form.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive string, e.g. `info` or `acadcal_core=debug`
    pub level: String,
}

impl Settings {
    /// Load settings from defaults, `acadcal.toml` (if present) and the environment.
    pub fn load() -> AcadCalResult<Self> {
        let builder = Self::builder_with_defaults()
            .map_err(config_error)?
            .add_source(File::with_name(CONFIG_FILE_NAME).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            );

        Self::build(builder)
    }

    /// Load settings from a TOML document layered over the defaults.
    pub fn from_toml_str(toml: &str) -> AcadCalResult<Self> {
        let builder = Self::builder_with_defaults()
            .map_err(config_error)?
            .add_source(File::from_str(toml, FileFormat::Toml));

        Self::build(builder)
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let prod_id = ProdId::default();

        Config::builder()
            .set_default("feed.url", DEFAULT_FEED_URL)?
            .set_default("feed.calendar_name", DEFAULT_CALENDAR_NAME)?
            .set_default("feed.timezone", DEFAULT_TIMEZONE)?
            .set_default("feed.fetch_timeout_secs", DEFAULT_FETCH_TIMEOUT_SECS)?
            .set_default("feed.user_agent", DEFAULT_USER_AGENT)?
            .set_default("feed.prod_id.company", prod_id.company)?
            .set_default("feed.prod_id.product", prod_id.product)?
            .set_default("feed.prod_id.language", prod_id.language)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> AcadCalResult<Self> {
        builder
            .build()
            .and_then(|config| config.try_deserialize::<Settings>())
            .map_err(config_error)
    }

    /// Validate the raw feed settings.
    pub fn feed_config(&self) -> AcadCalResult<FeedConfig> {
        let feed = &self.feed;

        let feed_url = Url::parse(&feed.url).map_err(|e| {
            AcadCalError::Config(format!("Invalid feed URL '{}': {e}", feed.url))
        })?;

        let timezone: Tz = feed.timezone.parse().map_err(|e| {
            AcadCalError::Config(format!("Unknown timezone '{}': {e}", feed.timezone))
        })?;

        if feed.fetch_timeout_secs == 0 {
            return Err(AcadCalError::Config(
                "fetch_timeout_secs must be greater than zero".into(),
            ));
        }

        Ok(FeedConfig {
            feed_url,
            calendar_name: feed.calendar_name.clone(),
            timezone,
            prod_id: feed.prod_id.clone(),
            fetch_timeout: Duration::from_secs(feed.fetch_timeout_secs),
            user_agent: feed.user_agent.clone(),
        })
    }
}

fn config_error(err: ConfigError) -> AcadCalError {
    AcadCalError::Config(err.to_string())
}
