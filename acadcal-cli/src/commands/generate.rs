use std::io::Write;
use std::path::Path;

use acadcal_core::{FeedConfig, regenerate};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::feed_source;
use crate::utils::tui::create_spinner;

pub async fn run(
    config: &FeedConfig,
    input: Option<&Path>,
    output: Option<&Path>,
    domain: &str,
) -> Result<()> {
    let fetcher = feed_source(config, input)?;

    let spinner = create_spinner(format!("Regenerating {}", config.calendar_name));
    let result = regenerate(fetcher.as_ref(), config, domain).await;
    spinner.finish_and_clear();
    let ics = result?;

    match output {
        Some(path) => {
            std::fs::write(path, &ics)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            let events = ics.matches("BEGIN:VEVENT").count();
            println!(
                "{} Wrote {} events to {}",
                "✓".green(),
                events,
                path.display().bold()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(ics.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
