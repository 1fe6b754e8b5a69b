//! Configuration types for the regenerator.

mod feed_config;
mod settings;

pub use feed_config::{FeedConfig, ProdId};
pub use settings::{FeedSettings, LoggingSettings, ServerSettings, Settings};
