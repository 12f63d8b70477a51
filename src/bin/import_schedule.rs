//! Import kickoff dates, times and venues from a CSV file into the stored fixtures.
//! Run with: cargo run --bin import-schedule -- schedule.csv
//! CSV header: matchCode,date,time,venue. Reads and writes the files in DATA_DIR (default: data).

use std::path::PathBuf;
use world_cup_tracker::{SnapshotStore, Tournament};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let csv_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("usage: import-schedule <schedule.csv>")?;
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());

    let store = SnapshotStore::new(&data_dir);
    let mut tournament = Tournament::new(store.load().await?);
    let file = std::fs::File::open(&csv_path)?;
    let updated = tournament.import_schedule(file)?;
    store.save(tournament.snapshot()).await?;

    log::info!(
        "Updated {} matches from {} into {}",
        updated,
        csv_path.display(),
        data_dir
    );
    Ok(())
}
