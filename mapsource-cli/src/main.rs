//! MapSource CLI - Command-line interface
//!
//! Look up tile addresses and fetch tiles from the built-in map sources.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{fetch, sources, tile};
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "mapsource")]
#[command(version, about = "UTM tile map sources", long_about = None)]
struct Cli {
    /// Config file (default: ~/.mapsource/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available map sources
    Sources,

    /// Print the tile containing a UTM coordinate
    Tile {
        /// Source name or id (default: from config)
        #[arg(long)]
        source: Option<String>,

        /// UTM zone
        #[arg(long)]
        zone: u8,

        /// Easting in meters
        #[arg(long, allow_hyphen_values = true)]
        easting: f64,

        /// Northing in meters
        #[arg(long, allow_hyphen_values = true)]
        northing: f64,

        /// Ground resolution in meters per pixel
        #[arg(long)]
        mpp: f64,

        /// Round tile indices toward negative infinity instead of zero
        #[arg(long)]
        floor: bool,
    },

    /// Print the center coordinate of a tile
    Center {
        /// Source name or id (default: from config)
        #[arg(long)]
        source: Option<String>,

        /// Scale level (8-19)
        #[arg(long)]
        scale: u8,

        /// Tile column
        #[arg(long, allow_hyphen_values = true)]
        x: i32,

        /// Tile row
        #[arg(long, allow_hyphen_values = true)]
        y: i32,

        /// UTM zone
        #[arg(long)]
        zone: u8,
    },

    /// Download the tile containing a UTM coordinate
    Fetch {
        /// Source name or id (default: from config)
        #[arg(long)]
        source: Option<String>,

        /// UTM zone
        #[arg(long)]
        zone: u8,

        /// Easting in meters
        #[arg(long, allow_hyphen_values = true)]
        easting: f64,

        /// Northing in meters
        #[arg(long, allow_hyphen_values = true)]
        northing: f64,

        /// Ground resolution in meters per pixel
        #[arg(long)]
        mpp: f64,

        /// Round tile indices toward negative infinity instead of zero
        #[arg(long)]
        floor: bool,

        /// Write here instead of the tile cache
        #[arg(long)]
        output: Option<PathBuf>,

        /// Download even if the tile is already cached
        #[arg(long)]
        refresh: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Sources => {
            let runner = CliRunner::new(config_path, false)?;
            sources::run(runner.registry());
            Ok(())
        }
        Commands::Tile {
            source,
            zone,
            easting,
            northing,
            mpp,
            floor,
        } => {
            let runner = CliRunner::new(config_path, false)?;
            tile::run(
                &runner,
                tile::TileArgs {
                    source,
                    zone,
                    easting,
                    northing,
                    mpp,
                    floor,
                },
            )
        }
        Commands::Center {
            source,
            scale,
            x,
            y,
            zone,
        } => {
            let runner = CliRunner::new(config_path, false)?;
            tile::run_center(
                &runner,
                tile::CenterArgs {
                    source,
                    scale,
                    x,
                    y,
                    zone,
                },
            )
        }
        Commands::Fetch {
            source,
            zone,
            easting,
            northing,
            mpp,
            floor,
            output,
            refresh,
        } => {
            let runner = CliRunner::new(config_path, true)?;
            fetch::run(
                &runner,
                fetch::FetchArgs {
                    source,
                    zone,
                    easting,
                    northing,
                    mpp,
                    floor,
                    output,
                    refresh,
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tile_with_negative_easting() {
        let cli = Cli::try_parse_from([
            "mapsource", "tile", "--source", "4", "--zone", "10", "--easting", "-100",
            "--northing", "100", "--mpp", "1", "--floor",
        ])
        .unwrap();
        match cli.command {
            Commands::Tile {
                source,
                easting,
                floor,
                ..
            } => {
                assert_eq!(source.as_deref(), Some("4"));
                assert_eq!(easting, -100.0);
                assert!(floor);
            }
            _ => panic!("Expected tile command"),
        }
    }

    #[test]
    fn test_parse_fetch_output() {
        let cli = Cli::try_parse_from([
            "mapsource", "--config", "/tmp/c.ini", "fetch", "--zone", "33", "--easting",
            "500000", "--northing", "4600000", "--mpp", "1", "--output", "tile.jpg",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.ini")));
        match cli.command {
            Commands::Fetch {
                output, refresh, ..
            } => {
                assert_eq!(output, Some(PathBuf::from("tile.jpg")));
                assert!(!refresh);
            }
            _ => panic!("Expected fetch command"),
        }
    }

    #[test]
    fn test_tile_requires_coordinates() {
        assert!(Cli::try_parse_from(["mapsource", "tile", "--zone", "10"]).is_err());
    }
}
