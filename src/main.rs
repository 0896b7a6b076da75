//! CLI entry point for the Green Button daily aggregation tool.
//!
//! Provides subcommands for aggregating a feed document into daily
//! time-of-use rows and for range-querying a previously exported
//! aggregate.

use anyhow::Result;
use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use green_button_daily::{
    classify::classify,
    daily::{AggregateConfig, aggregate_daily},
    fetch::{BasicClient, fetch_bytes},
    green_data::GreenData,
    output::{print_pretty, write_csv, write_json},
    parser::{extract_readings, parse_feed},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "green_button_daily")]
#[command(about = "A tool to aggregate Green Button feeds into daily TOU usage", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a Green Button feed document from a file or URL
    Analyze {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to also export the daily rows to
        #[arg(short, long)]
        csv: Option<String>,

        /// IANA timezone whose civil days readings are bucketed into
        #[arg(short, long, default_value = "America/Vancouver")]
        timezone: Tz,

        /// Keep only days with more than this many readings
        #[arg(short, long, default_value_t = 20)]
        min_readings: usize,

        /// Restrict output to days on or after this date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Restrict output to days on or before this date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Subset a previously exported aggregate JSON by date range
    Range {
        /// Path to a JSON export produced by `analyze`
        #[arg(value_name = "AGGREGATE_JSON")]
        input: String,

        /// First day of the range (YYYY-MM-DD)
        start: NaiveDate,

        /// Last day of the range (YYYY-MM-DD)
        end: NaiveDate,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/green_button_daily.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("green_button_daily.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            source,
            csv,
            timezone,
            min_readings,
            start,
            end,
        } => {
            let bytes = fetcher(&source).await?;
            let feed = parse_feed(&bytes)?;
            let readings = extract_readings(&feed)?;
            info!(readings = readings.len(), "Feed readings extracted");

            let partition = classify(readings)?;
            let config = AggregateConfig {
                timezone,
                min_readings_per_day: min_readings,
            };
            let data = aggregate_daily(&partition, &config);
            info!(
                days = data.len(),
                start = ?data.start_date(),
                end = ?data.end_date(),
                "Daily aggregation complete"
            );

            let data = apply_range(data, start, end)?;
            print_pretty(&data);

            if let Some(path) = csv {
                write_csv(&path, &data)?;
                info!(path, "CSV export written");
            }

            write_json(std::io::stdout().lock(), &data)?;
        }
        Commands::Range { input, start, end } => {
            let json = std::fs::read_to_string(&input)?;
            let data = GreenData::from_json(&json)?;
            let subset = data.range(start, end)?;
            info!(
                days = subset.len(),
                start = ?subset.start_date(),
                end = ?subset.end_date(),
                "Range query complete"
            );

            write_json(std::io::stdout().lock(), &subset)?;
        }
    }

    Ok(())
}

/// Applies an optional date-range restriction, defaulting each missing
/// bound to the aggregate's own bound.
fn apply_range(
    data: GreenData,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<GreenData> {
    if start.is_none() && end.is_none() {
        return Ok(data);
    }

    let (Some(view_start), Some(view_end)) = (data.start_date(), data.end_date()) else {
        anyhow::bail!("aggregate is empty, cannot apply a date range");
    };

    Ok(data.range(start.unwrap_or(view_start), end.unwrap_or(view_end))?)
}

/// Loads feed data from a local file path or fetches it over HTTP.
#[tracing::instrument(fields(source = %url))]
async fn fetcher(url: &str) -> Result<Vec<u8>> {
    let bytes = if url.starts_with("http") {
        let client = BasicClient::new();
        fetch_bytes(&client, url).await?
    } else {
        std::fs::read(url)?
    };
    Ok(bytes)
}
