//! Core pipeline for regenerating a registrar's academic-calendar XML feed
//! as an iCalendar feed.
//!
//! - `source`: parses the upstream XML into typed source events
//! - `transform`: derives time bounds, splits long all-day events, builds summaries
//! - `description`: assembles HTML and plain-text descriptions
//! - `ics`: serializes output events into an RFC 5545 document
//! - `fetch` and `pipeline`: tie the stages together per request

pub mod config;
pub mod description;
pub mod error;
pub mod event;
pub mod fetch;
pub mod ics;
pub mod pipeline;
pub mod source;
pub mod transform;

pub use config::{FeedConfig, Settings};
pub use error::{AcadCalError, AcadCalResult};
pub use event::{EventTime, OutputEvent, Transparency};
pub use fetch::{FeedFetcher, HttpFeedFetcher, StaticFeed};
pub use pipeline::{feed_events, regenerate, render_feed};
