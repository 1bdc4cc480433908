//! Error types for coordinate mapping and map source lookup.

use thiserror::Error;

use crate::coord::CoordinateSystem;
use crate::scale::ProviderType;

/// Result type for map source operations.
pub type MapSourceResult<T> = Result<T, MapSourceError>;

/// Errors that can occur while mapping coordinates onto a tile grid or
/// resolving a map source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapSourceError {
    /// The coordinate is not expressed in a system this source understands.
    #[error("coordinate system {found} is not supported by this map source (expected {expected})")]
    InvalidCoordinateSystem {
        expected: CoordinateSystem,
        found: CoordinateSystem,
    },

    /// Horizontal and vertical resolutions differ.
    #[error("anisotropic resolution {x}x{y} m/px: only square pixels are supported")]
    AnisotropicResolution { x: f64, y: f64 },

    /// The resolution does not land on the provider's scale ladder.
    #[error("no tile available at {mpp} m/px for provider type {provider_type}")]
    UnsupportedResolution {
        mpp: f64,
        provider_type: ProviderType,
    },

    /// The coordinate maps to a tile index that cannot be represented.
    #[error("coordinate ({easting}, {northing}) is outside the addressable tile grid")]
    CoordinateOutOfRange { easting: f64, northing: f64 },

    /// The UTM zone number is outside 1-60.
    #[error("UTM zone {0} is outside 1-60")]
    InvalidZone(u8),

    /// No map source registered under the given id or name.
    #[error("unknown map source '{0}'")]
    UnknownSource(String),

    /// A map source with this id is already registered.
    #[error("map source id {0} is already registered")]
    DuplicateSourceId(u8),
}
