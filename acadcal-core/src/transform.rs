//! Source event → output event(s).
//!
//! Each source event becomes one output event, except long all-day events
//! which are replaced by a "First Day of" / "Last Day of" pair so they don't
//! paint a banner across weeks of the calendar.

use chrono::{DateTime, Days, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;
use url::Url;

use crate::config::FeedConfig;
use crate::description::{Description, Paragraph, base_description};
use crate::error::{AcadCalError, AcadCalResult};
use crate::event::{OutputEvent, Transparency};
use crate::source::SourceEvent;

/// All-day events spanning at least this many days are split into markers.
pub const SPLIT_THRESHOLD_DAYS: f64 = 3.0;

pub const FIRST_DAY_SUFFIX: &str = ".first_day";
pub const LAST_DAY_SUFFIX: &str = ".last_day";

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Long date form used in marker sentences, e.g. "Monday, January 6, 2025"
const HUMAN_DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Start and exclusive end of a source event in the feed's timezone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventBounds {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub all_day: bool,
}

impl EventBounds {
    /// Derive bounds from the source timestamps.
    ///
    /// All-day events are published with `end` on the last covered day; one
    /// calendar day is added to make it exclusive. Day arithmetic happens on
    /// local wall time so bounds stay on midnight across DST changes.
    pub fn from_source(source: &SourceEvent, tz: Tz) -> AcadCalResult<Self> {
        let all_day = source.is_all_day();
        let start = instant(source, "dateStartUnix", source.date_start_unix, tz)?;
        let mut end = instant(source, "dateEndUnix", source.date_end_unix, tz)?;

        if all_day {
            end = end
                .checked_add_days(Days::new(1))
                .ok_or_else(|| coercion(source, "dateEndUnix", source.date_end_unix))?;
        }

        Ok(EventBounds {
            start,
            end,
            all_day,
        })
    }

    /// Wall-clock length in (possibly fractional) days.
    pub fn span_days(&self) -> f64 {
        let span = self.end.naive_local() - self.start.naive_local();
        span.num_seconds() as f64 / SECONDS_PER_DAY
    }

    pub fn should_split(&self) -> bool {
        self.all_day && self.span_days() >= SPLIT_THRESHOLD_DAYS
    }
}

/// Transform every source event, preserving feed order.
///
/// Fails on the first bad event; partial output is never returned.
pub fn transform_feed(
    sources: &[SourceEvent],
    config: &FeedConfig,
) -> AcadCalResult<Vec<OutputEvent>> {
    let mut events = Vec::with_capacity(sources.len());
    for source in sources {
        events.extend(transform_event(source, config)?);
    }
    Ok(events)
}

/// Transform one source event into one or two output events.
pub fn transform_event(source: &SourceEvent, config: &FeedConfig) -> AcadCalResult<Vec<OutputEvent>> {
    let bounds = EventBounds::from_source(source, config.timezone)?;

    let url = resolve(source, "path", source.path.as_deref(), &config.feed_url)?;
    let associated_link = resolve(
        source,
        "associatedLink",
        source.associated_link.as_deref(),
        &config.feed_url,
    )?;

    let base = EventTemplate {
        summary: format!("{} | {}", source.title, source.term),
        description: base_description(source, associated_link.as_deref(), url.as_deref()),
        url,
        last_modified: Utc
            .timestamp_opt(source.updated, 0)
            .single()
            .ok_or_else(|| coercion(source, "updated", source.updated))?,
    };

    if !bounds.should_split() {
        return Ok(vec![base.event(
            source.id.clone(),
            bounds.start,
            bounds.end,
            bounds.all_day,
            base.summary.clone(),
            &base.description,
        )?]);
    }

    debug!(
        id = %source.id,
        span_days = bounds.span_days(),
        "Splitting long all-day event into first/last day markers"
    );

    let first_day_end = next_day(source, bounds.start)?;
    let last_day_start = previous_day(source, bounds.end)?;

    let first_day = base.event(
        format!("{}{FIRST_DAY_SUFFIX}", source.id),
        bounds.start,
        first_day_end,
        true,
        format!("First Day of {}", base.summary),
        &base.description.with_prefix(Paragraph::text(format!(
            "This event ends on {}.",
            humanize(&last_day_start)
        ))),
    )?;

    let last_day = base.event(
        format!("{}{LAST_DAY_SUFFIX}", source.id),
        last_day_start,
        bounds.end,
        true,
        format!("Last Day of {}", base.summary),
        &base.description.with_prefix(Paragraph::text(format!(
            "This event starts on {}.",
            humanize(&bounds.start)
        ))),
    )?;

    Ok(vec![first_day, last_day])
}

/// Fields shared by every event produced from one source event.
struct EventTemplate {
    summary: String,
    description: Description,
    url: Option<String>,
    last_modified: DateTime<Utc>,
}

impl EventTemplate {
    fn event(
        &self,
        id: String,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
        all_day: bool,
        summary: String,
        description: &Description,
    ) -> AcadCalResult<OutputEvent> {
        Ok(OutputEvent {
            id,
            start,
            end,
            all_day,
            summary,
            description: description.to_plain_text(),
            html_description: description.to_html()?,
            url: self.url.clone(),
            last_modified: self.last_modified,
            transparency: Transparency::Transparent,
        })
    }
}

/// Human-readable long date, e.g. "Friday, May 2, 2025"
pub fn humanize(date: &DateTime<Tz>) -> String {
    date.format(HUMAN_DATE_FORMAT).to_string()
}

/// Resolve a feed-relative reference into an absolute URL.
fn resolve(
    source: &SourceEvent,
    field: &'static str,
    reference: Option<&str>,
    base: &Url,
) -> AcadCalResult<Option<String>> {
    reference
        .map(|reference| {
            base.join(reference)
                .map(String::from)
                .map_err(|_| coercion(source, field, reference))
        })
        .transpose()
}

fn instant(
    source: &SourceEvent,
    field: &'static str,
    secs: i64,
    tz: Tz,
) -> AcadCalResult<DateTime<Tz>> {
    tz.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| coercion(source, field, secs))
}

fn next_day(source: &SourceEvent, date: DateTime<Tz>) -> AcadCalResult<DateTime<Tz>> {
    date.checked_add_days(Days::new(1))
        .ok_or_else(|| coercion(source, "dateStartUnix", source.date_start_unix))
}

fn previous_day(source: &SourceEvent, date: DateTime<Tz>) -> AcadCalResult<DateTime<Tz>> {
    date.checked_sub_days(Days::new(1))
        .ok_or_else(|| coercion(source, "dateEndUnix", source.date_end_unix))
}

fn coercion(source: &SourceEvent, field: &'static str, value: impl ToString) -> AcadCalError {
    AcadCalError::FieldCoercion {
        node: source.id.clone(),
        field,
        value: value.to_string(),
    }
}
