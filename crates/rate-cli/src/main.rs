//! `parkrate` CLI — quote parking prices against a weekly rate configuration.
//!
//! ## Usage
//!
//! ```sh
//! # Quote with the built-in standard rates
//! parkrate quote --start 2015-07-01T07:00:00Z --end 2015-07-01T16:00:00Z
//!
//! # Quote with a configuration file, merged with an extra update pass
//! parkrate --config rates.json --update evening.json quote --start ... --end ...
//!
//! # Echo a parsed span and its length, as XML
//! parkrate duration --start 2015-07-01T07:00:00Z --end 2015-07-01T16:00:00Z --format xml
//!
//! # Validate a configuration file
//! parkrate check -i rates.json
//!
//! # Print the active schedule
//! parkrate --config rates.json show --format text
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

mod output;

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rate_engine::{ParkingSpan, RateStore, WeeklySchedule, DEFAULT_RATE_CONFIG};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use output::{CheckReport, OutputFormat, Quote, QuotedPrice, SpanReport};

#[derive(Parser)]
#[command(
    name = "parkrate",
    version,
    about = "Weekly parking rate lookup"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON rate configuration file (built-in standard rates if omitted)
    #[arg(short, long, global = true, env = "PARKRATE_CONFIG")]
    config: Option<String>,

    /// Rate configuration merged into the active rates; may be repeated
    #[arg(short, long, global = true)]
    update: Vec<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a parking span; both ends must fall on the same day
    Quote {
        /// Start time, RFC 3339
        #[arg(long)]
        start: String,
        /// End time, RFC 3339
        #[arg(long)]
        end: String,
    },
    /// Echo a parsed span with its duration; no rates are consulted
    Duration {
        /// Start time, RFC 3339
        #[arg(long)]
        start: String,
        /// End time, RFC 3339
        #[arg(long)]
        end: String,
    },
    /// Validate a rate configuration without publishing it
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print every interval of the active schedule
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Quote { start, end } => {
            let store = load_store(cli.config.as_deref(), &cli.update)?;
            let span = ParkingSpan::parse(&start, &end)?;
            let price = match store.lookup_span(&span) {
                Ok(price) => QuotedPrice::Amount(price),
                Err(e) if e.is_unavailable() => {
                    debug!(error = %e, "price unavailable");
                    QuotedPrice::Unavailable
                }
                Err(e) => return Err(e.into()),
            };
            let quote = Quote {
                start: span.start,
                end: span.end,
                price,
            };
            println!("{}", cli.format.quote(&quote)?);
        }
        Commands::Duration { start, end } => {
            let span = ParkingSpan::parse(&start, &end)?;
            println!("{}", cli.format.span(&SpanReport::from(&span))?);
        }
        Commands::Check { input } => {
            let text = read_input(input.as_deref())?;
            let mut schedule = WeeklySchedule::empty();
            schedule
                .apply_config(&text)
                .context("Invalid rate configuration")?;
            let report = CheckReport {
                valid: true,
                intervals: schedule.len(),
            };
            println!("{}", cli.format.check(&report)?);
        }
        Commands::Show => {
            let store = load_store(cli.config.as_deref(), &cli.update)?;
            let schedule = store
                .snapshot()
                .context("No rate schedule has been published")?;
            println!("{}", cli.format.schedule(schedule.intervals())?);
        }
    }

    Ok(())
}

/// Replace with the base configuration, then apply each update pass in order.
fn load_store(config: Option<&str>, updates: &[String]) -> Result<RateStore> {
    let base = match config {
        Some(path) => {
            info!(path, "using rates configuration file");
            read_file(path)?
        }
        None => DEFAULT_RATE_CONFIG.to_string(),
    };

    let store = RateStore::new();
    store
        .replace_rates(&base)
        .context("Failed to replace rates")?;

    for path in updates {
        let text = read_file(path)?;
        store
            .update_rates(&text)
            .with_context(|| format!("Failed to update rates from {}", path))?;
    }

    Ok(store)
}

fn read_file(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => read_file(path),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
