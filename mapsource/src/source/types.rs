//! Map source trait and shared configuration types.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::coord::GeoCoordinate;
use crate::error::MapSourceResult;
use crate::fetch::{FetchResult, TileFetchRequest, TileFetcher};
use crate::scale::ProviderType;
use crate::tile::{TileAddress, TileGrid};

/// Projection a map source expects the viewport to draw in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawMode {
    Utm,
    Expedia,
    Mercator,
    LatLon,
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawMode::Utm => write!(f, "UTM"),
            DrawMode::Expedia => write!(f, "Expedia"),
            DrawMode::Mercator => write!(f, "Mercator"),
            DrawMode::LatLon => write!(f, "Lat/Lon"),
        }
    }
}

/// Immutable per-source configuration, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSourceInfo {
    /// Registry key.
    pub unique_id: u8,
    /// Short machine-friendly name, e.g. `terraserver-urban`.
    pub name: String,
    /// Human readable label.
    pub label: String,
    pub provider_type: ProviderType,
    pub grid: TileGrid,
    pub draw_mode: DrawMode,
}

impl MapSourceInfo {
    /// Tile width in pixels.
    pub fn tile_size_x(&self) -> u32 {
        self.grid.tile_size_x
    }

    /// Tile height in pixels.
    pub fn tile_size_y(&self) -> u32 {
        self.grid.tile_size_y
    }
}

/// A tile map source.
///
/// Implementors translate coordinates into their own tile addressing scheme
/// and compose fetch requests for those tiles. They hold no mutable state and
/// can be shared freely between threads.
pub trait MapSource: Send + Sync {
    /// Returns this source's configuration.
    fn info(&self) -> &MapSourceInfo;

    /// Maps a coordinate at the requested resolution to a tile address.
    fn coord_to_tile_address(
        &self,
        coord: &GeoCoordinate,
        x_res: f64,
        y_res: f64,
    ) -> MapSourceResult<TileAddress>;

    /// Returns the coordinate of the center of a tile.
    fn tile_address_to_center(&self, addr: &TileAddress) -> GeoCoordinate;

    /// Composes the request that fetches a tile.
    fn request_for_tile(&self, addr: &TileAddress) -> TileFetchRequest;

    /// Fetches a tile into `dest` through the given fetcher.
    ///
    /// Whatever the fetcher reports is returned unchanged.
    fn fetch_tile(&self, addr: &TileAddress, dest: &Path, fetcher: &dyn TileFetcher) -> FetchResult {
        let request = self.request_for_tile(addr);
        debug!(
            source = self.info().name.as_str(),
            tile = %addr,
            host = request.host.as_str(),
            uri = request.uri_path.as_str(),
            dest = %dest.display(),
            "Fetching tile"
        );
        fetcher.fetch(&request, dest)
    }

    /// Full URL of a tile under the given scheme.
    fn tile_url(&self, addr: &TileAddress, scheme: &str) -> String {
        self.request_for_tile(addr).url(scheme)
    }

    /// Where a tile lives inside a cache rooted at `root`.
    fn cache_path(&self, addr: &TileAddress, root: &Path) -> std::path::PathBuf {
        addr.cache_path(root, self.info().provider_type)
    }
}
