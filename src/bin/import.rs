//! CSV loader for transit topology and schedule data.
//!
//! Usage: `import [data_dir]` with the data directory defaulting to
//! `./data`. Expects `lines.csv`, `stops.csv`, `line_stops.csv`,
//! `trips.csv` and `stop_events.csv`.

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use headway::server::{config::Config, service::import::ImportService, startup};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./data"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = match startup::connect_to_database(&config).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    match ImportService::new(&db).import_dir(&data_dir).await {
        Ok(report) => info!(
            "Import finished: {} lines, {} stops, {} line stops, {} trips, {} stop events",
            report.lines, report.stops, report.line_stops, report.trips, report.stop_events
        ),
        Err(e) => {
            tracing::error!("Import failed: {}", e);
            std::process::exit(1);
        }
    }
}
