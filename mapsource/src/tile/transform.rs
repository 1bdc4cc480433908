//! Coordinate ↔ tile address transforms.
//!
//! The tile grid is anchored at the UTM zone origin. At scale level `s` a
//! tile of `size` pixels covers `size * mpp(s)` meters on each side, so the
//! column is `easting / (size * mpp)` and the row is `northing / (size * mpp)`,
//! reduced to an integer by the grid's [`IndexRounding`] policy.
//!
//! The inverse returns the tile's center, not the original coordinate.

use tracing::trace;

use crate::coord::{CoordinateSystem, GeoCoordinate, Resolution, UtmCoord};
use crate::error::{MapSourceError, MapSourceResult};
use crate::scale::{mpp_to_scale, scale_to_mpp, ProviderType};

use super::TileAddress;

/// How a fractional tile index is reduced to an integer.
///
/// The two policies agree for non-negative coordinates and diverge below the
/// origin: with `TowardZero` tile 0 spans one tile width on either side of
/// the origin, with `Floor` every tile spans exactly one width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexRounding {
    /// Truncate toward zero (the server's historical behavior).
    #[default]
    TowardZero,
    /// Round toward negative infinity.
    Floor,
}

impl IndexRounding {
    fn apply(self, value: f64) -> f64 {
        match self {
            IndexRounding::TowardZero => value.trunc(),
            IndexRounding::Floor => value.floor(),
        }
    }
}

/// Pixel geometry of a provider's tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    /// Tile width in pixels.
    pub tile_size_x: u32,
    /// Tile height in pixels.
    pub tile_size_y: u32,
    /// Index rounding policy.
    pub rounding: IndexRounding,
}

impl TileGrid {
    /// A square grid with the default rounding policy.
    pub fn square(tile_size: u32) -> Self {
        Self {
            tile_size_x: tile_size,
            tile_size_y: tile_size,
            rounding: IndexRounding::default(),
        }
    }

    /// Set the index rounding policy.
    pub fn with_rounding(mut self, rounding: IndexRounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Ground extent of one tile in meters, per axis, at `mpp`.
    pub fn tile_extent(&self, mpp: f64) -> (f64, f64) {
        (
            self.tile_size_x as f64 * mpp,
            self.tile_size_y as f64 * mpp,
        )
    }

    fn index(&self, meters: f64, extent: f64) -> Option<i32> {
        let index = self.rounding.apply(meters / extent);
        if index.is_finite() && index >= i32::MIN as f64 && index <= i32::MAX as f64 {
            Some(index as i32)
        } else {
            None
        }
    }
}

/// Maps a UTM coordinate at the requested resolution onto the tile grid.
///
/// Checks run in a fixed order: coordinate system, pixel squareness, the
/// scale ladder, then zone and index range. A non-UTM coordinate is rejected
/// before the resolution is even looked at.
///
/// # Errors
///
/// - [`MapSourceError::InvalidCoordinateSystem`] for non-UTM input
/// - [`MapSourceError::AnisotropicResolution`] for non-square pixels
/// - [`MapSourceError::UnsupportedResolution`] when the resolution is off the
///   ladder or not published for `provider_type`
/// - [`MapSourceError::InvalidZone`] for a zone outside 1-60
/// - [`MapSourceError::CoordinateOutOfRange`] when the index does not fit
pub fn coord_to_tile_address(
    coord: &GeoCoordinate,
    resolution: Resolution,
    provider_type: ProviderType,
    grid: &TileGrid,
) -> MapSourceResult<TileAddress> {
    let utm = coord
        .as_utm()
        .ok_or(MapSourceError::InvalidCoordinateSystem {
            expected: CoordinateSystem::Utm,
            found: coord.system(),
        })?;

    if !resolution.is_square() {
        return Err(MapSourceError::AnisotropicResolution {
            x: resolution.x,
            y: resolution.y,
        });
    }
    let mpp = resolution.x;

    let scale = mpp_to_scale(mpp, provider_type).ok_or(
        MapSourceError::UnsupportedResolution { mpp, provider_type },
    )?;

    if !utm.has_valid_zone() {
        return Err(MapSourceError::InvalidZone(utm.zone));
    }

    let (extent_x, extent_y) = grid.tile_extent(mpp);
    let out_of_range = || MapSourceError::CoordinateOutOfRange {
        easting: utm.easting,
        northing: utm.northing,
    };
    let x = grid.index(utm.easting, extent_x).ok_or_else(out_of_range)?;
    let y = grid.index(utm.northing, extent_y).ok_or_else(out_of_range)?;

    trace!(
        zone = utm.zone,
        easting = utm.easting,
        northing = utm.northing,
        mpp,
        scale = scale.value(),
        x,
        y,
        "Mapped coordinate to tile"
    );

    Ok(TileAddress::new(scale, x, y, utm.zone))
}

/// Returns the UTM coordinate of the center of a tile.
///
/// The hemisphere is not part of the address, so the result is reported in
/// the northern hemisphere; the northing value itself is untouched.
pub fn tile_address_to_center(addr: &TileAddress, grid: &TileGrid) -> GeoCoordinate {
    let mpp = scale_to_mpp(addr.scale());
    let size_x = grid.tile_size_x as f64;
    let size_y = grid.tile_size_y as f64;

    GeoCoordinate::Utm(UtmCoord::new(
        addr.zone(),
        (addr.x() as f64 * size_x + size_x / 2.0) * mpp,
        (addr.y() as f64 * size_y + size_y / 2.0) * mpp,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleLevel;
    use proptest::prelude::*;

    fn grid() -> TileGrid {
        TileGrid::square(200)
    }

    fn utm(easting: f64, northing: f64) -> GeoCoordinate {
        GeoCoordinate::utm(33, easting, northing)
    }

    fn one() -> Resolution {
        Resolution::square(1.0)
    }

    #[test]
    fn test_reference_point() {
        let addr = coord_to_tile_address(
            &utm(500_000.0, 4_600_000.0),
            Resolution::new(1.0, 1.0),
            ProviderType::URBAN,
            &grid(),
        )
        .unwrap();

        assert_eq!(addr.scale().value(), 10);
        assert_eq!(addr.x(), 2500);
        assert_eq!(addr.y(), 23000);
        assert_eq!(addr.zone(), 33);
    }

    #[test]
    fn test_coarse_scale() {
        // 16 m/px tiles cover 3200 m
        let addr = coord_to_tile_address(
            &utm(500_000.0, 4_600_000.0),
            Resolution::new(16.0, 16.0),
            ProviderType::TOPO,
            &grid(),
        )
        .unwrap();

        assert_eq!(addr.scale().value(), 14);
        assert_eq!(addr.x(), 156);
        assert_eq!(addr.y(), 1437);
    }

    #[test]
    fn test_anisotropic_resolution() {
        let result = coord_to_tile_address(
            &utm(500_000.0, 4_600_000.0),
            Resolution::new(1.0, 2.0),
            ProviderType::URBAN,
            &grid(),
        );
        assert_eq!(
            result,
            Err(MapSourceError::AnisotropicResolution { x: 1.0, y: 2.0 })
        );
    }

    #[test]
    fn test_non_utm_rejected_first() {
        // Anisotropic and off-ladder, but the coordinate system wins
        let result = coord_to_tile_address(
            &GeoCoordinate::lat_lon(41.5, 15.0),
            Resolution::new(0.33, 2.0),
            ProviderType::URBAN,
            &grid(),
        );
        assert_eq!(
            result,
            Err(MapSourceError::InvalidCoordinateSystem {
                expected: CoordinateSystem::Utm,
                found: CoordinateSystem::LatLon,
            })
        );
    }

    #[test]
    fn test_unsupported_resolution() {
        let result = coord_to_tile_address(
            &utm(500_000.0, 4_600_000.0),
            Resolution::new(0.33, 0.33),
            ProviderType::URBAN,
            &grid(),
        );
        assert!(matches!(
            result,
            Err(MapSourceError::UnsupportedResolution { .. })
        ));
    }

    #[test]
    fn test_resolution_gated_by_type() {
        let result = coord_to_tile_address(
            &utm(500_000.0, 4_600_000.0),
            Resolution::new(1.0, 1.0),
            ProviderType::TOPO,
            &grid(),
        );
        assert_eq!(
            result,
            Err(MapSourceError::UnsupportedResolution {
                mpp: 1.0,
                provider_type: ProviderType::TOPO,
            })
        );
    }

    #[test]
    fn test_negative_coordinates_toward_zero() {
        let addr = coord_to_tile_address(
            &utm(-150.0, -250.0),
            Resolution::new(1.0, 1.0),
            ProviderType::URBAN,
            &grid(),
        )
        .unwrap();
        assert_eq!(addr.x(), 0);
        assert_eq!(addr.y(), -1);
    }

    #[test]
    fn test_negative_coordinates_floor() {
        let floor = grid().with_rounding(IndexRounding::Floor);
        let addr = coord_to_tile_address(
            &utm(-150.0, -250.0),
            Resolution::new(1.0, 1.0),
            ProviderType::URBAN,
            &floor,
        )
        .unwrap();
        assert_eq!(addr.x(), -1);
        assert_eq!(addr.y(), -2);
    }

    #[test]
    fn test_positive_coordinates_policies_agree() {
        let coord = utm(12_345.6, 98_765.4);
        let res = Resolution::square(2.0);
        let a = coord_to_tile_address(&coord, res, ProviderType::AERIAL, &grid()).unwrap();
        let b = coord_to_tile_address(
            &coord,
            res,
            ProviderType::AERIAL,
            &grid().with_rounding(IndexRounding::Floor),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_tile_boundary_belongs_to_next_tile() {
        let addr =
            coord_to_tile_address(&utm(200.0, 199.999), one(), ProviderType::URBAN, &grid())
                .unwrap();
        assert_eq!(addr.x(), 1);
        assert_eq!(addr.y(), 0);
    }

    #[test]
    fn test_out_of_range() {
        let result = coord_to_tile_address(
            &utm(1e15, 0.0),
            Resolution::new(0.25, 0.25),
            ProviderType::URBAN,
            &grid(),
        );
        assert!(matches!(
            result,
            Err(MapSourceError::CoordinateOutOfRange { .. })
        ));

        let result =
            coord_to_tile_address(&utm(f64::NAN, 0.0), one(), ProviderType::URBAN, &grid());
        assert!(matches!(
            result,
            Err(MapSourceError::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_zone_out_of_range() {
        for zone in [0, 61, 200] {
            let result = coord_to_tile_address(
                &GeoCoordinate::utm(zone, 500_000.0, 4_600_000.0),
                one(),
                ProviderType::URBAN,
                &grid(),
            );
            assert_eq!(result, Err(MapSourceError::InvalidZone(zone)));
        }
    }

    #[test]
    fn test_zone_checked_after_resolution() {
        let result = coord_to_tile_address(
            &GeoCoordinate::utm(0, 500_000.0, 4_600_000.0),
            Resolution::new(1.0, 2.0),
            ProviderType::URBAN,
            &grid(),
        );
        assert!(matches!(
            result,
            Err(MapSourceError::AnisotropicResolution { .. })
        ));
    }

    #[test]
    fn test_center_of_reference_tile() {
        let addr = TileAddress::new(ScaleLevel::new(10).unwrap(), 2500, 23000, 33);
        let center = tile_address_to_center(&addr, &grid());
        assert_eq!(center, GeoCoordinate::utm(33, 500_100.0, 4_600_100.0));
    }

    #[test]
    fn test_center_of_negative_tile() {
        let addr = TileAddress::new(ScaleLevel::new(11).unwrap(), -1, -1, 5);
        let center = tile_address_to_center(&addr, &grid());
        assert_eq!(center, GeoCoordinate::utm(5, -200.0, -200.0));
    }

    #[test]
    fn test_center_is_not_original() {
        let coord = utm(500_042.0, 4_600_017.0);
        let addr =
            coord_to_tile_address(&coord, one(), ProviderType::URBAN, &grid()).unwrap();
        assert_ne!(tile_address_to_center(&addr, &grid()), coord);
    }

    #[test]
    fn test_rectangular_grid() {
        let grid = TileGrid {
            tile_size_x: 256,
            tile_size_y: 128,
            rounding: IndexRounding::TowardZero,
        };
        let addr =
            coord_to_tile_address(&utm(1024.0, 1024.0), one(), ProviderType::URBAN, &grid)
                .unwrap();
        assert_eq!(addr.x(), 4);
        assert_eq!(addr.y(), 8);
        let center = tile_address_to_center(&addr, &grid);
        assert_eq!(center, GeoCoordinate::utm(33, 1152.0, 1088.0));
    }

    fn ladder_mpp() -> impl Strategy<Value = f64> {
        (ScaleLevel::MIN..=ScaleLevel::MAX)
            .prop_map(|level| scale_to_mpp(ScaleLevel::new(level).unwrap()))
    }

    fn assert_within_footprint(
        coord: &GeoCoordinate,
        mpp: f64,
        grid: &TileGrid,
    ) -> Result<(), TestCaseError> {
        let original = *coord.as_utm().unwrap();
        let addr =
            coord_to_tile_address(coord, Resolution::square(mpp), ProviderType::URBAN, grid)
                .unwrap();
        let center = tile_address_to_center(&addr, grid);
        let center = center.as_utm().unwrap();
        let (extent_x, extent_y) = grid.tile_extent(mpp);

        prop_assert_eq!(center.zone, original.zone);
        prop_assert!((center.easting - original.easting).abs() <= extent_x);
        prop_assert!((center.northing - original.northing).abs() <= extent_y);
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_center_within_footprint(
            easting in 0.0f64..1_000_000.0,
            northing in 0.0f64..10_000_000.0,
            mpp in ladder_mpp(),
        ) {
            assert_within_footprint(&utm(easting, northing), mpp, &grid())?;
        }

        #[test]
        fn prop_floor_footprint_holds_below_origin(
            easting in -1_000_000.0f64..1_000_000.0,
            northing in -10_000_000.0f64..10_000_000.0,
            mpp in ladder_mpp(),
        ) {
            let floor = grid().with_rounding(IndexRounding::Floor);
            assert_within_footprint(&utm(easting, northing), mpp, &floor)?;
        }
    }
}
