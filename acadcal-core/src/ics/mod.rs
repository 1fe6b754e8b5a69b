//! ICS calendar generation.
//!
//! This module serializes output events into an RFC 5545 document.

mod generate;

pub use generate::generate_calendar;

use crate::config::FeedConfig;
use chrono_tz::Tz;

/// Calendar-level metadata written once per document.
#[derive(Debug, Clone)]
pub struct CalendarMetadata {
    /// Host name appended to every UID (`<id>@<domain>`)
    pub domain: String,
    /// Human-readable calendar name (X-WR-CALNAME)
    pub name: String,
    pub timezone: Tz,
    /// Full PRODID value
    pub prod_id: String,
}

impl CalendarMetadata {
    pub fn new(config: &FeedConfig, domain: &str) -> Self {
        CalendarMetadata {
            domain: domain.to_string(),
            name: config.calendar_name.clone(),
            timezone: config.timezone,
            prod_id: config.prod_id.to_ics_value(),
        }
    }
}
