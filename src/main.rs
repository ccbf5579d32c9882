//! CLI entry point for the trip analytics dashboard.
//!
//! Provides subcommands for serving the dashboard over HTTP and for
//! computing a one-shot filtered report.

use std::ffi::OsStr;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use trip_dashboard::analytics::pipeline;
use trip_dashboard::analytics::types::FilterCriteria;
use trip_dashboard::loader::load_dataset;
use trip_dashboard::output::{append_kpis, print_json};
use trip_dashboard::server;

#[derive(Parser)]
#[command(name = "trip_dashboard")]
#[command(about = "A web-served analytics dashboard over a trips CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard over HTTP
    Serve {
        /// Path to the trips CSV
        #[arg(short, long, default_value = "trips_data.csv")]
        data: String,

        /// Port to bind the server to
        #[arg(short, long, default_value_t = 5000)]
        port: u16,
    },
    /// Compute the dashboard once and print it as JSON
    Report {
        /// Path to the trips CSV
        #[arg(short, long, default_value = "trips_data.csv")]
        data: String,

        /// Inclusive lower date bound (YYYY-MM-DD)
        #[arg(long)]
        date_from: Option<String>,

        /// Inclusive upper date bound (YYYY-MM-DD)
        #[arg(long)]
        date_to: Option<String>,

        /// Restrict to one driver ("all" = no restriction)
        #[arg(long, default_value = "all")]
        driver: String,

        /// Restrict to one origin city ("all" = no restriction)
        #[arg(long, default_value = "all")]
        from_city: String,

        /// Restrict to one destination city ("all" = no restriction)
        #[arg(long, default_value = "all")]
        to_city: String,

        /// CSV file to append the KPI row to instead of printing JSON
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/trip_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("trip_dashboard.log"));

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
        Commands::Serve { data, port } => {
            let dataset = Arc::new(load_dataset(&data)?);

            let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
            let app = server::router(dataset);

            info!(%addr, "Starting dashboard server");
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
        Commands::Report {
            data,
            date_from,
            date_to,
            driver,
            from_city,
            to_city,
            output,
        } => {
            let dataset = load_dataset(&data)?;

            // Same decoding rules as the HTTP surface: "all" and malformed
            // dates mean no restriction.
            let criteria: FilterCriteria = server::DashboardQuery {
                date_from,
                date_to,
                driver: Some(driver),
                from_city: Some(from_city),
                to_city: Some(to_city),
            }
            .into_criteria();

            let report = pipeline::run(&dataset, &criteria);

            match output {
                Some(path) => {
                    append_kpis(&path, &report.kpis)?;
                    info!(path, "KPI row appended");
                }
                None => print_json(&report)?,
            }
        }
    }

    Ok(())
}
