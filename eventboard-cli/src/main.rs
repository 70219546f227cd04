mod commands;
mod render;
mod when;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use eventboard_core::config::{EventboardConfig, parse_tz};
use eventboard_core::feed::Feed;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eventboard")]
#[command(about = "Arrange an event feed into today, upcoming and past highlights")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Events file to read (defaults to events_file from config)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Pretend it is this moment (e.g. "2025-03-20", "2025-03-20T18:00:00Z", "next sunday")
    #[arg(long, global = true)]
    now: Option<String>,

    /// Timezone that decides calendar days (e.g. "America/Sao_Paulo")
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Featured events for today, the previous one and the next ones
    Board {
        /// Expand the "more upcoming" and "earlier" lists
        #[arg(short, long)]
        all: bool,

        #[arg(long)]
        json: bool,
    },
    /// Every event under its bucket (today, tomorrow, this week, ...)
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show config location and effective settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = EventboardConfig::load()?;
    let tz = resolve_timezone(cli.tz.as_deref(), &config)?;

    match cli.command {
        Commands::Board { all, json } => {
            let feed = load_feed(cli.file, &config)?;
            let now = resolve_now(cli.now.as_deref(), &tz)?;
            commands::board::run(&feed, &now, all, json)
        }
        Commands::List { json } => {
            let feed = load_feed(cli.file, &config)?;
            let now = resolve_now(cli.now.as_deref(), &tz)?;
            commands::list::run(&feed, &now, json)
        }
        Commands::Config => commands::config::run(&config, &tz),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_feed(file: Option<PathBuf>, config: &EventboardConfig) -> Result<Feed> {
    let path = file.unwrap_or_else(|| config.events_path());

    if !path.exists() {
        anyhow::bail!(
            "No events file at {}.\n\n\
            Point eventboard at a JSON export with:\n  \
            eventboard --file <path> board\n\n\
            or set events_file in {}",
            path.display(),
            EventboardConfig::config_path()?.display()
        );
    }

    tracing::debug!(path = %path.display(), "loading events");
    let feed = Feed::load(&path).with_context(|| format!("Could not read {}", path.display()))?;

    if feed.skipped > 0 {
        tracing::warn!("{} event record(s) could not be read and were left out", feed.skipped);
    }

    Ok(feed)
}

/// `--tz`, then config, then the system zone, then UTC.
fn resolve_timezone(flag: Option<&str>, config: &EventboardConfig) -> Result<Tz> {
    if let Some(name) = flag {
        return Ok(parse_tz(name)?);
    }

    if let Some(tz) = config.tz()? {
        return Ok(tz);
    }

    match iana_time_zone::get_timezone() {
        Ok(name) => match parse_tz(&name) {
            Ok(tz) => Ok(tz),
            Err(e) => {
                tracing::warn!("{}, falling back to UTC", e);
                Ok(Tz::UTC)
            }
        },
        Err(e) => {
            tracing::warn!("Could not detect system timezone ({}), falling back to UTC", e);
            Ok(Tz::UTC)
        }
    }
}

fn resolve_now(flag: Option<&str>, tz: &Tz) -> Result<DateTime<Tz>> {
    match flag {
        Some(input) => when::parse_now(input, tz),
        None => Ok(Utc::now().with_timezone(tz)),
    }
}
