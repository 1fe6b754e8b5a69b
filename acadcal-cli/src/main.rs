mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use acadcal_core::Settings;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "acadcal")]
#[command(about = "Regenerate the academic calendar feed as iCalendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write the .ics document
    Generate {
        /// Read feed XML from this file instead of the live feed
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write the calendar here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Host name used in event UIDs
        #[arg(short, long, default_value = "localhost")]
        domain: String,
    },
    /// List the events the calendar would contain
    Events {
        /// Read feed XML from this file instead of the live feed
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let settings = Settings::load().context("Failed to load configuration")?;
    init_tracing(&settings.logging.level);
    let config = settings.feed_config()?;

    match cli.command {
        Commands::Generate {
            input,
            output,
            domain,
        } => commands::generate::run(&config, input.as_deref(), output.as_deref(), &domain).await,
        Commands::Events { input } => commands::events::run(&config, input.as_deref()).await,
    }
}

/// Logs go to stderr so stdout stays a clean .ics stream.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
