//! Gearadmin CLI - queue status across one or more job-queue daemons

mod addr;

use std::time::Duration;

use addr::ServerAddr;
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use gearadmin_client::{CheckedSource, GearadminClient};
use gearadmin_core::application::{AggregateReport, Aggregator};
use gearadmin_core::domain::filter;
use gearadmin_core::port::StatusSource;
use gearadmin_core::{SortKey, StatusLines, StatusRecord};
use tabled::{Table, Tabled};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "gearadmin")]
#[command(about = "Show job queue status from one or more daemons", long_about = None)]
#[command(version)]
struct Cli {
    /// Daemon address, host[:port]; repeat (or comma-separate) to merge several
    #[arg(
        short = 's',
        long = "server",
        env = "GEARADMIN_SERVERS",
        value_delimiter = ',',
        default_value = "localhost:4730"
    )]
    servers: Vec<ServerAddr>,

    /// Connect timeout in milliseconds
    #[arg(long, env = "GEARADMIN_TIMEOUT_MS", default_value_t = 1000)]
    timeout_ms: u64,

    /// Sort by: name, queued, running, workers
    #[arg(long, default_value = "name")]
    sort: SortKey,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Only queues whose name contains this text (case-insensitive)
    #[arg(short, long)]
    filter: Option<String>,

    /// Hide queues with nothing queued, running or registered
    #[arg(long)]
    hide_idle: bool,

    /// Treat a reply that ends without its terminator as a failure
    #[arg(long)]
    strict: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Queue")]
    name: String,
    #[tabled(rename = "Queued")]
    queued: String,
    #[tabled(rename = "Running")]
    running: String,
    #[tabled(rename = "Workers")]
    workers: String,
}

impl From<&StatusRecord> for StatusRow {
    fn from(record: &StatusRecord) -> Self {
        Self {
            name: record.name().to_string(),
            queued: record.queued().to_string(),
            running: record.running().to_string(),
            workers: record.workers().to_string(),
        }
    }
}

fn init_logging() -> Result<()> {
    let log_format =
        std::env::var("GEARADMIN_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .context("Failed to create env filter")?;

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

fn build_aggregator(cli: &Cli) -> Aggregator {
    let timeout = Duration::from_millis(cli.timeout_ms);
    let mut aggregator = Aggregator::new();
    for server in &cli.servers {
        let client = GearadminClient::new(server.host.clone(), server.port)
            .with_connect_timeout(timeout);
        let source: Box<dyn StatusSource> = if cli.strict {
            Box::new(CheckedSource(client))
        } else {
            Box::new(client)
        };
        aggregator.add(source);
    }
    aggregator
}

/// Filter and sort the merged collection as requested on the command line
fn arrange(cli: &Cli, mut lines: StatusLines) -> StatusLines {
    if let Some(needle) = &cli.filter {
        lines.retain(filter::name_contains(needle));
    }
    if cli.hide_idle {
        lines.retain(filter::not_idle);
    }
    lines.sort(cli.sort, !cli.desc);
    lines
}

fn print_report(cli: &Cli, report: &AggregateReport, lines: &StatusLines) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(lines)?);
    } else {
        println!(
            "{} {}",
            "Queue Status".cyan().bold(),
            format!("({} of {} servers)", report.answered, cli.servers.len()).dimmed()
        );
        println!();
        let rows: Vec<StatusRow> = lines.iter().map(StatusRow::from).collect();
        println!("{}", Table::new(rows));
    }

    for failure in &report.failures {
        eprintln!(
            "  {} {} {}",
            "✗".red(),
            failure.label.bold(),
            failure.error.to_string().red()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    debug!(servers = ?cli.servers, sort = %cli.sort, "Starting");

    let mut aggregator = build_aggregator(&cli);
    let mut report = aggregator.collect().await;

    if report.answered == 0 && !report.failures.is_empty() {
        print_report(&cli, &report, &StatusLines::new())?;
        anyhow::bail!("No server answered");
    }

    let lines = arrange(&cli, std::mem::take(&mut report.lines));
    print_report(&cli, &report, &lines)?;

    Ok(())
}
