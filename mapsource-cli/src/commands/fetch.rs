//! Fetch command - download a single tile into the cache or a file.

use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use mapsource::coord::GeoCoordinate;
use mapsource::fetch::FetchOutcome;

use super::tile::locate;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the fetch command.
pub struct FetchArgs {
    pub source: Option<String>,
    pub zone: u8,
    pub easting: f64,
    pub northing: f64,
    pub mpp: f64,
    pub floor: bool,
    pub output: Option<PathBuf>,
    pub refresh: bool,
}

/// Run the fetch command.
pub fn run(runner: &CliRunner, args: FetchArgs) -> Result<(), CliError> {
    runner.log_startup("fetch");

    let coord = GeoCoordinate::utm(args.zone, args.easting, args.northing);
    let (source, addr) = locate(runner, args.source.as_deref(), &coord, args.mpp, args.floor)?;
    let dest = args
        .output
        .unwrap_or_else(|| source.cache_path(&addr, runner.cache_dir()));
    let fetcher = runner.fetcher(args.refresh)?;

    println!("Fetching {} from {}", addr, source.info().label);
    println!("  {}", source.tile_url(&addr, fetcher.scheme()));

    let start = Instant::now();
    let outcome = source
        .fetch_tile(&addr, &dest, &fetcher)
        .map_err(CliError::Fetch)?;
    let elapsed = start.elapsed();

    match outcome {
        FetchOutcome::Downloaded { bytes } => {
            info!(tile = %addr, bytes, elapsed_ms = elapsed.as_millis() as u64, "Tile downloaded");
            println!(
                "Downloaded {} bytes in {:.2}s → {}",
                bytes,
                elapsed.as_secs_f64(),
                dest.display()
            );
        }
        FetchOutcome::Cached => {
            info!(tile = %addr, "Tile already cached");
            println!("Already cached → {}", dest.display());
        }
    }
    Ok(())
}
