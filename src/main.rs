//! CLI entry point for the flight route dashboard.
//!
//! Loads and cleans the flight dataset, then either serves the dashboard over
//! local HTTP or prints the per-route summary.

use anyhow::Result;
use bytes::Bytes;
use clap::{Parser, Subcommand, ValueEnum};
use flight_routes::analyzers::aggregate::route_summaries;
use flight_routes::dashboard::{DashboardContext, render_page, serve, server::DEFAULT_ADDR};
use flight_routes::graph::DEFAULT_SEED;
use flight_routes::output::{print_pretty, write_csv, write_json};
use flight_routes::table::Table;
use flight_routes::{cleaner::clean, loader::load_table};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_INPUT: &str = "data/goibibo_flights_data.csv";

#[derive(Parser)]
#[command(name = "flight_routes")]
#[command(about = "Route analysis dashboard for flight pricing data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard page over local HTTP
    Serve {
        /// CSV file with at least `from`, `to` and `price` columns
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Address to listen on
        #[arg(short, long, default_value = DEFAULT_ADDR)]
        addr: String,

        /// Seed for the network layout
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Print flight count and average price per route
    Routes {
        /// CSV file with at least `from`, `to` and `price` columns
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/flight_routes.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("flight_routes.log"));

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
        Commands::Serve { input, addr, seed } => {
            let table = load_clean(&input)?;
            let ctx = DashboardContext::build(table, seed)?;
            let page = Bytes::from(render_page(&ctx)?);
            info!(bytes = page.len(), "Dashboard page rendered");

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            serve(listener, page, shutdown_signal()).await?;
        }
        Commands::Routes { input, format } => {
            let table = load_clean(&input)?;
            let routes = route_summaries(&table)?;
            let stdout = std::io::stdout().lock();

            match format {
                Format::Table => print_pretty(&routes),
                Format::Json => write_json(stdout, &routes)?,
                Format::Csv => write_csv(stdout, &routes)?,
            }
        }
    }

    Ok(())
}

/// Loads the dataset and applies the cleaning pass.
#[tracing::instrument(skip(input), fields(input = %input.display()))]
fn load_clean(input: &Path) -> Result<Table> {
    let table = load_table(input)?;
    clean(table)
}

/// Resolves on Ctrl+C, starting graceful shutdown of the server.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Starting graceful shutdown...");
}
