//! ICS file generation.

use super::CalendarMetadata;
use crate::error::AcadCalResult;
use crate::event::{EventTime, OutputEvent, Transparency};
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

/// Generate a complete .ics document for `events`, in order.
pub fn generate_calendar(events: &[OutputEvent], metadata: &CalendarMetadata) -> AcadCalResult<String> {
    let mut cal = Calendar::new();

    // X-WR-CALNAME - Human-readable calendar name (de facto standard)
    cal.append_property(Property::new("X-WR-CALNAME", &metadata.name));
    cal.append_property(Property::new("NAME", &metadata.name));

    // X-WR-TIMEZONE - default zone for clients that ignore TZID
    cal.append_property(Property::new("X-WR-TIMEZONE", metadata.timezone.name()));

    for event in events {
        cal.push(ics_event(event, metadata));
    }

    let cal = cal.done();

    Ok(replace_prod_id(&cal.to_string(), &metadata.prod_id))
}

fn ics_event(event: &OutputEvent, metadata: &CalendarMetadata) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&format!("{}@{}", event.id, metadata.domain));
    ics_event.summary(&event.summary);

    // DTSTAMP - required by RFC 5545. Derived from the source's modification
    // time so regenerating an unchanged feed yields identical output.
    let last_modified = event.last_modified.format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &last_modified);
    ics_event.add_property("LAST-MODIFIED", &last_modified);

    add_datetime_property(&mut ics_event, "DTSTART", &event.start_time());
    add_datetime_property(&mut ics_event, "DTEND", &event.end_time());

    if !event.description.is_empty() {
        ics_event.description(&event.description);
    }

    if !event.html_description.is_empty() {
        let mut prop = Property::new("X-ALT-DESC", &event.html_description);
        prop.add_parameter("FMTTYPE", "text/html");
        ics_event.append_property(prop);
    }

    if let Some(ref url) = event.url {
        ics_event.add_property("URL", url);
    }

    let transp = match event.transparency {
        Transparency::Opaque => "OPAQUE",
        Transparency::Transparent => "TRANSPARENT",
    };
    ics_event.add_property("TRANSP", transp);

    ics_event.done()
}

/// Add a datetime property with proper formatting based on EventTime variant
fn add_datetime_property(ics_event: &mut icalendar::Event, name: &str, time: &EventTime) {
    match time {
        EventTime::Date(d) => {
            let mut prop = Property::new(name, d.format("%Y%m%d").to_string());
            prop.append_parameter(ValueType::Date);
            ics_event.append_property(prop);
        }
        EventTime::DateTimeZoned { datetime, tzid } => {
            let mut prop = Property::new(name, datetime.format("%Y%m%dT%H%M%S").to_string());
            prop.add_parameter("TZID", tzid);
            ics_event.append_property(prop);
        }
    }
}

/// The icalendar crate always writes its own PRODID; swap in ours.
fn replace_prod_id(ics: &str, prod_id: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(prod_id);
        } else {
            result.push_str(line);
        }
        result.push_str("\r\n");
    }

    result
}
