use std::path::Path;

use acadcal_core::{FeedConfig, FeedFetcher, feed_events};
use anyhow::Result;
use owo_colors::OwoColorize;

use super::feed_source;
use crate::render::Render;
use crate::utils::tui::create_spinner;

pub async fn run(config: &FeedConfig, input: Option<&Path>) -> Result<()> {
    let fetcher = feed_source(config, input)?;

    let spinner = create_spinner("Fetching feed".to_string());
    let xml = fetcher.fetch().await;
    spinner.finish_and_clear();

    let events = feed_events(&xml?, config)?;

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in &events {
        println!("{}", event.render());
    }

    println!();
    println!("{}", format!("{} events", events.len()).dimmed());

    Ok(())
}
