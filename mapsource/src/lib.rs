//! MapSource - UTM tile map sources
//!
//! This library maps UTM coordinates onto the Terraserver tile grid,
//! composes tile requests, and fetches and validates the resulting tiles.
//!
//! # Example
//!
//! ```
//! use mapsource::coord::GeoCoordinate;
//! use mapsource::source::MapSourceRegistry;
//!
//! let registry = MapSourceRegistry::builtin();
//! let urban = registry.find("terraserver-urban").unwrap();
//!
//! let coord = GeoCoordinate::utm(33, 500_000.0, 4_600_000.0);
//! let addr = urban.coord_to_tile_address(&coord, 1.0, 1.0).unwrap();
//! assert_eq!((addr.scale().value(), addr.x(), addr.y()), (10, 2500, 23000));
//!
//! assert_eq!(
//!     urban.tile_url(&addr, "http"),
//!     "http://terraserver-usa.com/tile.ashx?T=4&S=10&X=2500&Y=23000&Z=33"
//! );
//! ```

pub mod config;
pub mod coord;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod render;
pub mod scale;
pub mod source;
pub mod tile;
pub mod validity;
