//! Tile and center commands - map between coordinates and tile addresses.

use std::path::Path;
use std::sync::Arc;

use mapsource::coord::GeoCoordinate;
use mapsource::scale::{scale_to_mpp, ScaleLevel};
use mapsource::source::MapSource;
use mapsource::tile::{IndexRounding, TileAddress};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the tile command.
pub struct TileArgs {
    pub source: Option<String>,
    pub zone: u8,
    pub easting: f64,
    pub northing: f64,
    pub mpp: f64,
    pub floor: bool,
}

/// Arguments for the center command.
pub struct CenterArgs {
    pub source: Option<String>,
    pub scale: u8,
    pub x: i32,
    pub y: i32,
    pub zone: u8,
}

/// Maps the arguments to a tile address, honoring `--floor`.
pub fn locate(
    runner: &CliRunner,
    source_key: Option<&str>,
    coord: &GeoCoordinate,
    mpp: f64,
    floor: bool,
) -> Result<(Arc<dyn MapSource>, TileAddress), CliError> {
    let rounding = if floor {
        IndexRounding::Floor
    } else {
        IndexRounding::TowardZero
    };
    let source = runner.resolve_source_with(source_key, rounding)?;
    let addr = source.coord_to_tile_address(coord, mpp, mpp)?;
    Ok((source, addr))
}

/// Run the tile command.
pub fn run(runner: &CliRunner, args: TileArgs) -> Result<(), CliError> {
    let coord = GeoCoordinate::utm(args.zone, args.easting, args.northing);
    let (source, addr) = locate(runner, args.source.as_deref(), &coord, args.mpp, args.floor)?;

    print_tile(source.as_ref(), &addr, &runner.config().source.scheme, runner.cache_dir());
    Ok(())
}

/// Run the center command.
pub fn run_center(runner: &CliRunner, args: CenterArgs) -> Result<(), CliError> {
    let scale = ScaleLevel::new(args.scale).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "scale level {} is outside {}..={}",
            args.scale,
            ScaleLevel::MIN,
            ScaleLevel::MAX
        ))
    })?;
    let source = runner.resolve_source(args.source.as_deref())?;
    let addr = TileAddress::new(scale, args.x, args.y, args.zone);

    let center = source.tile_address_to_center(&addr);
    println!("Source:  {}", source.info().label);
    println!("Tile:    {}", addr);
    println!("Center:  {}", center);
    println!("Res:     {} m/px", scale_to_mpp(scale));
    Ok(())
}

fn print_tile(source: &dyn MapSource, addr: &TileAddress, scheme: &str, cache_dir: &Path) {
    println!("Source:  {}", source.info().label);
    println!("Tile:    {}", addr);
    println!("Center:  {}", source.tile_address_to_center(addr));
    println!("URL:     {}", source.tile_url(addr, scheme));
    println!("Cache:   {}", source.cache_path(addr, cache_dir).display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapsource::config::ConfigFile;
    use tempfile::TempDir;

    fn runner() -> (TempDir, CliRunner) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        ConfigFile::default().save_to(&path).unwrap();
        let runner = CliRunner::new(Some(path.as_path()), false).unwrap();
        (temp, runner)
    }

    #[test]
    fn test_locate_truncates_by_default() {
        let (_temp, runner) = runner();
        let coord = GeoCoordinate::utm(10, -100.0, 100.0);
        let (_, addr) = locate(&runner, Some("4"), &coord, 1.0, false).unwrap();
        assert_eq!(addr.x(), 0);
    }

    #[test]
    fn test_locate_floor() {
        let (_temp, runner) = runner();
        let coord = GeoCoordinate::utm(10, -100.0, 100.0);
        let (source, addr) = locate(&runner, Some("4"), &coord, 1.0, true).unwrap();
        assert_eq!(addr.x(), -1);
        assert_eq!(source.info().unique_id, 4);
    }

    #[test]
    fn test_locate_unsupported_resolution() {
        let (_temp, runner) = runner();
        let coord = GeoCoordinate::utm(10, 1000.0, 1000.0);
        assert!(matches!(
            locate(&runner, Some("terraserver-topo"), &coord, 1.0, false),
            Err(CliError::Source(_))
        ));
    }

    #[test]
    fn test_center_rejects_bad_scale() {
        let (_temp, runner) = runner();
        let args = CenterArgs {
            source: None,
            scale: 25,
            x: 0,
            y: 0,
            zone: 10,
        };
        assert!(matches!(
            run_center(&runner, args),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
