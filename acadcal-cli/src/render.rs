//! Terminal rendering for calendar events.

use acadcal_core::{EventTime, OutputEvent};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for OutputEvent {
    fn render(&self) -> String {
        let kind = if self.all_day {
            "all-day".cyan().to_string()
        } else {
            "  timed".yellow().to_string()
        };

        format!(
            "{} {} {} {} {}",
            format_time(&self.start_time()),
            format!("→ {}", format_time(&self.end_time())).dimmed(),
            kind,
            self.summary.bold(),
            format!("[{}]", self.id).dimmed()
        )
    }
}

/// Fixed-width start/end column (e.g. "2025-04-28" or "2025-04-28 17:00")
fn format_time(time: &EventTime) -> String {
    match time {
        EventTime::Date(d) => format!("{:<16}", d.format("%Y-%m-%d").to_string()),
        EventTime::DateTimeZoned { datetime, .. } => datetime.format("%Y-%m-%d %H:%M").to_string(),
    }
}
