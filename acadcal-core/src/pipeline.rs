//! Fetch → parse → transform → emit.

use tracing::{error, info};

use crate::config::FeedConfig;
use crate::error::AcadCalResult;
use crate::event::OutputEvent;
use crate::fetch::FeedFetcher;
use crate::ics::{CalendarMetadata, generate_calendar};
use crate::source::parse_feed;
use crate::transform::transform_feed;

/// Regenerate the full calendar from the upstream feed.
///
/// `domain` is the host name used in every event UID.
pub async fn regenerate(
    fetcher: &dyn FeedFetcher,
    config: &FeedConfig,
    domain: &str,
) -> AcadCalResult<String> {
    let xml = fetcher.fetch().await?;
    render_feed(&xml, config, domain)
}

/// Turn feed XML into a complete ICS document.
pub fn render_feed(xml: &str, config: &FeedConfig, domain: &str) -> AcadCalResult<String> {
    let events = feed_events(xml, config)?;
    let metadata = CalendarMetadata::new(config, domain);

    let ics = generate_calendar(&events, &metadata).inspect_err(|err| {
        error!(error = %err, "Calendar generation failed");
    })?;

    info!(events = events.len(), bytes = ics.len(), domain, "Calendar generated");
    Ok(ics)
}

/// Parse and transform feed XML without serializing.
pub fn feed_events(xml: &str, config: &FeedConfig) -> AcadCalResult<Vec<OutputEvent>> {
    let sources = parse_feed(xml).inspect_err(|err| {
        error!(error = %err, "Feed parse failed");
    })?;
    info!(nodes = sources.len(), "Parsed upstream feed");

    transform_feed(&sources, config).inspect_err(|err| {
        error!(error = %err, "Event transformation failed");
    })
}
