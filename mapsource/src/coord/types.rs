//! Coordinate value types.

use std::fmt;

/// Coordinate system tag used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateSystem {
    /// Universal Transverse Mercator.
    Utm,
    /// Geographic latitude/longitude in degrees.
    LatLon,
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateSystem::Utm => write!(f, "UTM"),
            CoordinateSystem::LatLon => write!(f, "LatLon"),
        }
    }
}

/// UTM hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hemisphere {
    #[default]
    North,
    South,
}

/// A projected UTM position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmCoord {
    /// UTM zone (1–60).
    pub zone: u8,
    /// Hemisphere the northing is measured in.
    pub hemisphere: Hemisphere,
    /// Easting in meters.
    pub easting: f64,
    /// Northing in meters.
    pub northing: f64,
}

impl UtmCoord {
    /// Lowest UTM zone number.
    pub const MIN_ZONE: u8 = 1;
    /// Highest UTM zone number.
    pub const MAX_ZONE: u8 = 60;

    /// Creates a northern hemisphere UTM coordinate.
    pub fn new(zone: u8, easting: f64, northing: f64) -> Self {
        Self {
            zone,
            hemisphere: Hemisphere::North,
            easting,
            northing,
        }
    }

    /// Returns true when the zone number is one of the 60 UTM zones.
    pub fn has_valid_zone(&self) -> bool {
        (Self::MIN_ZONE..=Self::MAX_ZONE).contains(&self.zone)
    }

    /// Sets the hemisphere.
    pub fn with_hemisphere(mut self, hemisphere: Hemisphere) -> Self {
        self.hemisphere = hemisphere;
        self
    }
}

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A coordinate in one of the supported coordinate systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoCoordinate {
    Utm(UtmCoord),
    LatLon(LatLon),
}

impl GeoCoordinate {
    /// Shorthand for a northern hemisphere UTM coordinate.
    pub fn utm(zone: u8, easting: f64, northing: f64) -> Self {
        GeoCoordinate::Utm(UtmCoord::new(zone, easting, northing))
    }

    /// Shorthand for a latitude/longitude coordinate.
    pub fn lat_lon(lat: f64, lon: f64) -> Self {
        GeoCoordinate::LatLon(LatLon::new(lat, lon))
    }

    /// Returns which coordinate system this value is expressed in.
    pub fn system(&self) -> CoordinateSystem {
        match self {
            GeoCoordinate::Utm(_) => CoordinateSystem::Utm,
            GeoCoordinate::LatLon(_) => CoordinateSystem::LatLon,
        }
    }

    /// Returns the UTM payload, if any.
    pub fn as_utm(&self) -> Option<&UtmCoord> {
        match self {
            GeoCoordinate::Utm(utm) => Some(utm),
            GeoCoordinate::LatLon(_) => None,
        }
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoCoordinate::Utm(utm) => {
                let hemi = match utm.hemisphere {
                    Hemisphere::North => 'N',
                    Hemisphere::South => 'S',
                };
                write!(
                    f,
                    "{}{} {:.1}E {:.1}N",
                    utm.zone, hemi, utm.easting, utm.northing
                )
            }
            GeoCoordinate::LatLon(ll) => write!(f, "{:.6}, {:.6}", ll.lat, ll.lon),
        }
    }
}

/// Ground resolution of a viewport, in meters per pixel along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub x: f64,
    pub y: f64,
}

impl Resolution {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A resolution with square pixels.
    pub fn square(mpp: f64) -> Self {
        Self { x: mpp, y: mpp }
    }

    /// Returns true when both axes share the same resolution.
    pub fn is_square(&self) -> bool {
        self.x == self.y
    }
}
