//! Normalized events emitted into the calendar.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// A calendar entry ready for serialization.
///
/// `start`/`end` are absolute instants in the feed's timezone. For all-day
/// events both bounds fall on local midnight and `end` is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputEvent {
    /// Unique per emitted entry (source id, optionally with a marker suffix)
    pub id: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub all_day: bool,
    pub summary: String,
    /// Plain-text rendering of `html_description`
    pub description: String,
    pub html_description: String,
    pub url: Option<String>,
    pub last_modified: DateTime<Utc>,
    pub transparency: Transparency,
}

impl OutputEvent {
    pub fn start_time(&self) -> EventTime {
        EventTime::from_bound(&self.start, self.all_day)
    }

    pub fn end_time(&self) -> EventTime {
        EventTime::from_bound(&self.end, self.all_day)
    }
}

/// Event transparency (busy/free status)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transparency {
    /// Event blocks time on calendar
    Opaque,
    /// Event does not block time (shows as free)
    Transparent,
}

/// How a time bound is written into the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTime {
    /// Bare date (VALUE=DATE), for all-day events
    Date(NaiveDate),
    /// Local wall time qualified with a TZID
    DateTimeZoned {
        datetime: NaiveDateTime,
        tzid: String,
    },
}

impl EventTime {
    fn from_bound(bound: &DateTime<Tz>, all_day: bool) -> Self {
        if all_day {
            EventTime::Date(bound.date_naive())
        } else {
            EventTime::DateTimeZoned {
                datetime: bound.naive_local(),
                tzid: bound.timezone().name().to_string(),
            }
        }
    }
}
