//! Enviroscope CLI
//!
//! Fetches current conditions, forecast, UV index and air quality for a
//! city as one all-or-nothing snapshot and renders the classified report.

#![allow(clippy::print_stdout)]

mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use application::{DashboardService, SlotState};
use clap::{Parser, Subcommand, ValueEnum};
use domain::classification::{ClassificationConfig, classify};
use domain::value_objects::LocationQuery;
use infrastructure::{AppConfig, OpenWeatherMapGateway, init_logging};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

/// Enviroscope CLI
#[derive(Parser)]
#[command(name = "enviroscope")]
#[command(author, version, about = "Weather, UV and air quality at a glance", long_about = None)]
struct Cli {
    /// Verbosity level (overrides RUST_LOG and the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./enviroscope.toml if present)
    #[arg(short, long, env = "ENVIROSCOPE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and display the snapshot for a city
    ///
    /// Example: enviroscope fetch Paris
    Fetch {
        /// City to look up
        city: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Forecast split cutoff in °C (overrides the configured value)
        #[arg(long)]
        cutoff: Option<f64>,
    },

    /// Read one city per line from stdin; a new line supersedes the last
    Interactive,

    /// Classify a value with the configured threshold tables
    ///
    /// Example: enviroscope classify uv 7.5
    Classify {
        /// Which table to use
        #[arg(value_enum)]
        metric: Metric,

        /// Value to classify
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Print the effective configuration as TOML (API key omitted)
    Config,
}

/// Threshold tables selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Metric {
    /// UV index
    Uv,
    /// Air quality index (1-5)
    Aqi,
    /// Temperature in °C
    Temp,
}

/// Log filter forced by the verbosity count; `None` keeps `RUST_LOG` or the
/// configured filter
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Classify `value` with the table for `metric` and return the tier label
fn classify_metric(config: &ClassificationConfig, metric: Metric, value: f64) -> String {
    match metric {
        Metric::Uv => classify(value, &config.uv_thresholds).to_string(),
        Metric::Aqi => classify(value, &config.aqi_thresholds).to_string(),
        Metric::Temp => classify(value, &config.temp_thresholds).to_string(),
    }
}

fn build_dashboard(config: &AppConfig) -> anyhow::Result<DashboardService> {
    let gateway = OpenWeatherMapGateway::with_config(
        config.openweathermap.to_weather_config(),
        config.openweathermap.api_key.clone(),
    )
    .context("Failed to create OpenWeatherMap gateway")?;

    Ok(DashboardService::new(
        Arc::new(gateway),
        config.classification.clone(),
    ))
}

/// Print a captured slot state; returns false unless it holds a snapshot
fn print_state(dashboard: &DashboardService, state: &SlotState, json: bool) -> anyhow::Result<bool> {
    match state {
        SlotState::Ready { query, .. } => {
            let report = dashboard.report_for(state)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::render_report(query, &report));
            }
            Ok(true)
        },
        SlotState::Failed { query, reason } => {
            print!("{}", render::render_failure(query, reason));
            Ok(false)
        },
        SlotState::Empty => Ok(false),
    }
}

async fn run_interactive(dashboard: Arc<DashboardService>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: Option<JoinHandle<()>> = None;

    println!("🔎 Enter a city per line (Ctrl-D to quit)");

    while let Some(line) = lines.next_line().await? {
        let Ok(query) = LocationQuery::new(&line) else {
            println!("⚠️  Please enter a city name");
            continue;
        };

        if let Some(previous) = in_flight.take() {
            previous.abort();
        }

        let dashboard = Arc::clone(&dashboard);
        in_flight = Some(tokio::spawn(async move {
            match dashboard.search_state(query).await {
                Some(state) => {
                    if let Err(e) = print_state(&dashboard, &state, false) {
                        println!("❌ {e}");
                    }
                },
                None => debug!("Dropped superseded result"),
            }
        }));
    }

    if let Some(last) = in_flight {
        // aborted tasks resolve with a cancellation error, which is expected
        let _ = last.await;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(cli.config.as_deref())?;
    init_logging(&config.logging, log_filter_from_verbosity(cli.verbose))?;

    match cli.command {
        Commands::Fetch { city, json, cutoff } => {
            let query = LocationQuery::new(&city).context("City must not be empty")?;
            if let Some(cutoff) = cutoff {
                if !cutoff.is_finite() {
                    bail!("Cutoff must be a finite number");
                }
                config.classification.series_split_cutoff = cutoff;
            }

            let dashboard = build_dashboard(&config)?;
            let state = dashboard
                .search_state(query)
                .await
                .unwrap_or_else(|| dashboard.state());

            if !print_state(&dashboard, &state, json)? {
                std::process::exit(1);
            }
        },

        Commands::Interactive => {
            let dashboard = Arc::new(build_dashboard(&config)?);
            run_interactive(dashboard).await?;
        },

        Commands::Classify { metric, value } => {
            let tier = classify_metric(&config.classification, metric, value);
            println!("{value} → {tier}");
        },

        Commands::Config => {
            print!("{}", config.to_toml()?);
        },
    }

    Ok(())
}
