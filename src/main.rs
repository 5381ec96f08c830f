//! CLI entry point for the passenger survival report.
//!
//! Loads a passenger CSV from a file or URL and emits the summary figures,
//! chart series and table preview that a dashboard renders.

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use passenger_survival::{
    config::ReportOptions,
    error::ERROR_NOTICE,
    output::{print_pretty, summary_lines, write_outputs},
    report::{Report, load_report},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_SOURCE: &str = "data/titanic.csv";

#[derive(Parser)]
#[command(name = "passenger_survival")]
#[command(about = "Summarize passenger survival data for charting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full report: summary, charts and table preview
    Report {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL", default_value = DEFAULT_SOURCE)]
        source: String,

        /// Write the report as JSON to this file instead of logging it
        #[arg(short, long)]
        json: Option<String>,

        /// Also write the table preview as CSV to this file
        #[arg(long)]
        table_csv: Option<String>,

        /// Number of passengers in the table preview
        #[arg(long)]
        table_limit: Option<usize>,
    },
    /// Print only the summary figures
    Summary {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL", default_value = DEFAULT_SOURCE)]
        source: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/passenger_survival.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("passenger_survival.log"));

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
    let mut options = ReportOptions::from_env();

    match cli.command {
        Commands::Report {
            source,
            json,
            table_csv,
            table_limit,
        } => {
            if let Some(limit) = table_limit {
                options.table_limit = limit;
            }
            let report = build(&source, &options).await?;

            if let Err(e) = write_outputs(&report, json.as_deref(), table_csv.as_deref()) {
                error!(error = %e, "Failed to write report output");
                return Err(anyhow!(ERROR_NOTICE));
            }
            info!(json = ?json, table_csv = ?table_csv, "Report written");
        }
        Commands::Summary { source } => {
            let report = build(&source, &options).await?;
            for line in summary_lines(&report.summary) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

/// Runs the pipeline; any failure is logged and replaced by the generic notice.
async fn build(source: &str, options: &ReportOptions) -> Result<Report> {
    match load_report(source, options).await {
        Ok(report) => {
            print_pretty(&report);
            Ok(report)
        }
        Err(e) => {
            error!(error = %e, source, "Failed to build report");
            Err(anyhow!(ERROR_NOTICE))
        }
    }
}
