//! Coordinate types and projection helpers
//!
//! Map sources in this crate address tiles in UTM. Geographic coordinates
//! are only used at the rendering boundary, where they are projected into
//! spherical Web Mercator meters.

mod types;

pub use types::{CoordinateSystem, GeoCoordinate, Hemisphere, LatLon, Resolution, UtmCoord};

use std::f64::consts::PI;

/// WGS84 semi-major axis used by spherical Web Mercator (EPSG:3857).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator square.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Projects a geographic position into spherical Web Mercator meters.
///
/// Latitudes beyond ±[`MAX_MERCATOR_LAT`] are clamped so the result stays
/// finite.
#[inline]
pub fn to_web_mercator(position: LatLon) -> (f64, f64) {
    let lat = position.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
    let x = EARTH_RADIUS_M * position.lon * PI / 180.0;
    let lat_rad = lat * PI / 180.0;
    let y = EARTH_RADIUS_M * lat_rad.tan().asinh();
    (x, y)
}
