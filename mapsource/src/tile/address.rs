//! Tile address type.
//!
//! A [`TileAddress`] identifies one downloadable tile: a scale level, the
//! column/row index within the UTM zone, and the zone itself.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::scale::{ProviderType, ScaleLevel};

/// Discrete grid cell identifying one tile for a given provider type.
///
/// # Note
///
/// Indices are signed. Eastings and northings are normally positive in UTM,
/// but nothing stops a viewport from straying past the false origin, and the
/// index produced there depends on the grid's rounding policy.
///
/// # Example
///
/// ```
/// use mapsource::scale::ScaleLevel;
/// use mapsource::tile::TileAddress;
///
/// let scale = ScaleLevel::new(10).unwrap();
/// let addr = TileAddress::new(scale, 2500, 23000, 33);
/// assert_eq!(addr.x(), 2500);
/// assert_eq!(addr.y(), 23000);
/// assert_eq!(addr.zone(), 33);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileAddress {
    scale: ScaleLevel,
    /// Column, counted eastward from the zone's false origin
    x: i32,
    /// Row, counted northward from the equator
    y: i32,
    zone: u8,
}

impl TileAddress {
    /// Create a new tile address.
    pub fn new(scale: ScaleLevel, x: i32, y: i32, zone: u8) -> Self {
        Self { scale, x, y, zone }
    }

    /// Get the scale level.
    pub fn scale(&self) -> ScaleLevel {
        self.scale
    }

    /// Get the tile column.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Get the tile row.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Get the UTM zone.
    pub fn zone(&self) -> u8 {
        self.zone
    }

    /// Location of this tile in an on-disk tile cache.
    ///
    /// Layout is `<root>/t<type>s<scale>z<zone>/<x>/<y>`, which keeps tiles of
    /// different categories and scales in separate directories.
    pub fn cache_path(&self, root: &Path, provider_type: ProviderType) -> PathBuf {
        root.join(format!(
            "t{}s{}z{}",
            provider_type, self.scale, self.zone
        ))
        .join(self.x.to_string())
        .join(self.y.to_string())
    }
}

impl fmt::Display for TileAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S{} X{} Y{} Z{}",
            self.scale, self.x, self.y, self.zone
        )
    }
}
