//! Terraserver-USA map source.
//!
//! Serves USGS imagery on a UTM grid of 200×200 pixel tiles.
//!
//! # URL Pattern
//!
//! `http://terraserver-usa.com/tile.ashx?T={type}&S={scale}&X={x}&Y={y}&Z={zone}`
//!
//! - `T`: imagery category (1 aerial, 2 topographic, 4 urban)
//! - `S`: scale level, 8 (0.25 m/px) to 19 (512 m/px)
//! - `X`/`Y`: tile column/row, counted from the zone origin in tile widths
//! - `Z`: UTM zone
//!
//! # Coverage
//!
//! United States only. Requests outside coverage return an error image or
//! page, which the [`ValidityPolicy::MapTile`] check rejects.

use crate::coord::{GeoCoordinate, Resolution};
use crate::error::MapSourceResult;
use crate::fetch::{DownloadOptions, TileFetchRequest};
use crate::scale::ProviderType;
use crate::tile::{self, IndexRounding, TileAddress, TileGrid};
use crate::validity::ValidityPolicy;

use super::types::{DrawMode, MapSource, MapSourceInfo};

/// Terraserver host name.
pub const TERRASERVER_HOST: &str = "terraserver-usa.com";

/// Tile edge length in pixels.
pub const TERRASERVER_TILE_SIZE: u32 = 200;

/// Terraserver imagery source for one provider type.
///
/// # Example
///
/// ```
/// use mapsource::coord::GeoCoordinate;
/// use mapsource::scale::ProviderType;
/// use mapsource::source::{MapSource, TerraserverMapSource};
///
/// let source = TerraserverMapSource::new(4, ProviderType::URBAN);
/// let coord = GeoCoordinate::utm(33, 500_000.0, 4_600_000.0);
/// let addr = source.coord_to_tile_address(&coord, 1.0, 1.0).unwrap();
/// let request = source.request_for_tile(&addr);
/// assert_eq!(request.uri_path, "/tile.ashx?T=4&S=10&X=2500&Y=23000&Z=33");
/// ```
#[derive(Debug, Clone)]
pub struct TerraserverMapSource {
    info: MapSourceInfo,
    host: String,
}

impl TerraserverMapSource {
    /// Creates a source registered under `unique_id` serving `provider_type`.
    pub fn new(unique_id: u8, provider_type: ProviderType) -> Self {
        let (name, label) = match provider_type {
            ProviderType::AERIAL => ("terraserver-aerial".to_string(), "Terraserver Aerials".to_string()),
            ProviderType::TOPO => ("terraserver-topo".to_string(), "Terraserver Topos".to_string()),
            ProviderType::URBAN => ("terraserver-urban".to_string(), "Terraserver Urban Areas".to_string()),
            other => (format!("terraserver-t{}", other), format!("Terraserver Type {}", other)),
        };

        Self {
            info: MapSourceInfo {
                unique_id,
                name,
                label,
                provider_type,
                grid: TileGrid::square(TERRASERVER_TILE_SIZE),
                draw_mode: DrawMode::Utm,
            },
            host: TERRASERVER_HOST.to_string(),
        }
    }

    /// Point requests at a different host, e.g. a mirror.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the tile index rounding policy.
    pub fn with_rounding(mut self, rounding: IndexRounding) -> Self {
        self.info.grid = self.info.grid.with_rounding(rounding);
        self
    }

    /// The host requests are sent to.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn build_uri(&self, addr: &TileAddress) -> String {
        format!(
            "/tile.ashx?T={}&S={}&X={}&Y={}&Z={}",
            self.info.provider_type,
            addr.scale(),
            addr.x(),
            addr.y(),
            addr.zone()
        )
    }
}

impl MapSource for TerraserverMapSource {
    fn info(&self) -> &MapSourceInfo {
        &self.info
    }

    fn coord_to_tile_address(
        &self,
        coord: &GeoCoordinate,
        x_res: f64,
        y_res: f64,
    ) -> MapSourceResult<TileAddress> {
        tile::coord_to_tile_address(
            coord,
            Resolution::new(x_res, y_res),
            self.info.provider_type,
            &self.info.grid,
        )
    }

    fn tile_address_to_center(&self, addr: &TileAddress) -> GeoCoordinate {
        tile::tile_address_to_center(addr, &self.info.grid)
    }

    fn request_for_tile(&self, addr: &TileAddress) -> TileFetchRequest {
        TileFetchRequest {
            host: self.host.clone(),
            uri_path: self.build_uri(addr),
            options: DownloadOptions::with_validity(ValidityPolicy::MapTile),
        }
    }
}
