//! Scale ladder arithmetic.
//!
//! Terraserver-style providers publish imagery on a fixed power-of-two ladder
//! of ground resolutions. Each rung is addressed by a [`ScaleLevel`] in the
//! range 8–19, where level 10 corresponds to one meter per pixel:
//!
//! ```text
//! mpp:    0.25  0.5  1   2   4   8   16  32  64  128  256  512
//! level:  8     9    10  11  12  13  14  15  16  17   18   19
//! ```
//!
//! The finest two rungs exist only for the urban imagery category, and the
//! one meter rung is not published for topographic maps.

use std::fmt;

/// Tolerance when snapping a resolution onto the ladder.
pub const MARGIN_OF_ERROR: f64 = 0.001;

/// Imagery category served by a provider.
///
/// The category selects the request path on the server and gates which
/// scale levels are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProviderType(u8);

impl ProviderType {
    /// Digital orthophoto quadrangles (aerial photography).
    pub const AERIAL: ProviderType = ProviderType(1);
    /// Digital raster graphics (scanned topographic maps).
    pub const TOPO: ProviderType = ProviderType(2);
    /// High resolution urban area imagery.
    pub const URBAN: ProviderType = ProviderType(4);

    /// Wraps a raw provider type value.
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Returns the raw value sent on the wire.
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One rung of the provider's resolution ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScaleLevel(u8);

impl ScaleLevel {
    /// Finest level on the ladder (0.25 m/px).
    pub const MIN: u8 = 8;
    /// Coarsest level on the ladder (512 m/px).
    pub const MAX: u8 = 19;

    /// Creates a scale level, returning `None` outside 8–19.
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    /// Returns the raw level value.
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ScaleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts a ground resolution to a scale level.
///
/// Returns `None` when the resolution is not within [`MARGIN_OF_ERROR`] of a
/// ladder rung (after scaling by four), or when the rung is not published for
/// `provider_type`.
pub fn mpp_to_scale(mpp: f64, provider_type: ProviderType) -> Option<ScaleLevel> {
    let scaled = mpp * 4.0;
    if !scaled.is_finite() {
        return None;
    }

    let t = scaled.trunc();
    if (scaled - t).abs() > MARGIN_OF_ERROR {
        return None;
    }

    let level = match t as i64 {
        1 => (provider_type == ProviderType::URBAN).then_some(8)?,
        2 => (provider_type == ProviderType::URBAN).then_some(9)?,
        4 => (provider_type != ProviderType::TOPO).then_some(10)?,
        8 => 11,
        16 => 12,
        32 => 13,
        64 => 14,
        128 => 15,
        256 => 16,
        512 => 17,
        1024 => 18,
        2048 => 19,
        _ => return None,
    };

    Some(ScaleLevel(level))
}

/// Converts a scale level back to its ground resolution in meters per pixel.
#[inline]
pub fn scale_to_mpp(scale: ScaleLevel) -> f64 {
    2.0_f64.powi(scale.0 as i32 - 10)
}

/// Lists every resolution the provider type publishes, finest first.
pub fn supported_resolutions(provider_type: ProviderType) -> Vec<f64> {
    (ScaleLevel::MIN..=ScaleLevel::MAX)
        .map(|level| scale_to_mpp(ScaleLevel(level)))
        .filter(|&mpp| mpp_to_scale(mpp, provider_type).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LADDER: [(f64, u8); 12] = [
        (0.25, 8),
        (0.5, 9),
        (1.0, 10),
        (2.0, 11),
        (4.0, 12),
        (8.0, 13),
        (16.0, 14),
        (32.0, 15),
        (64.0, 16),
        (128.0, 17),
        (256.0, 18),
        (512.0, 19),
    ];

    #[test]
    fn test_ladder_for_urban() {
        for (mpp, level) in LADDER {
            let scale = mpp_to_scale(mpp, ProviderType::URBAN);
            assert_eq!(scale.map(ScaleLevel::value), Some(level), "mpp {}", mpp);
        }
    }

    #[test]
    fn test_scale_to_mpp_inverts_ladder() {
        for ty in [ProviderType::AERIAL, ProviderType::TOPO, ProviderType::URBAN] {
            for (mpp, _) in LADDER {
                if let Some(scale) = mpp_to_scale(mpp, ty) {
                    assert_eq!(scale_to_mpp(scale), mpp, "type {} mpp {}", ty, mpp);
                }
            }
        }
    }

    #[test]
    fn test_finest_rungs_only_for_urban() {
        for mpp in [0.25, 0.5] {
            assert!(mpp_to_scale(mpp, ProviderType::URBAN).is_some());
            assert!(mpp_to_scale(mpp, ProviderType::AERIAL).is_none());
            assert!(mpp_to_scale(mpp, ProviderType::TOPO).is_none());
            assert!(mpp_to_scale(mpp, ProviderType::new(3)).is_none());
        }
    }

    #[test]
    fn test_one_meter_not_for_topo() {
        assert!(mpp_to_scale(1.0, ProviderType::TOPO).is_none());
        assert_eq!(
            mpp_to_scale(1.0, ProviderType::AERIAL).map(ScaleLevel::value),
            Some(10)
        );
        assert_eq!(
            mpp_to_scale(1.0, ProviderType::URBAN).map(ScaleLevel::value),
            Some(10)
        );
        assert_eq!(
            mpp_to_scale(1.0, ProviderType::new(7)).map(ScaleLevel::value),
            Some(10)
        );
    }

    #[test]
    fn test_off_ladder_resolution_rejected() {
        assert!(mpp_to_scale(0.33, ProviderType::URBAN).is_none());
        assert!(mpp_to_scale(3.0, ProviderType::URBAN).is_none());
        assert!(mpp_to_scale(1024.0, ProviderType::URBAN).is_none());
        assert!(mpp_to_scale(0.0, ProviderType::URBAN).is_none());
        assert!(mpp_to_scale(-1.0, ProviderType::URBAN).is_none());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(mpp_to_scale(f64::NAN, ProviderType::URBAN).is_none());
        assert!(mpp_to_scale(f64::INFINITY, ProviderType::URBAN).is_none());
    }

    #[test]
    fn test_margin_of_error() {
        // 4.0008 truncates to 4 with 0.0008 left over
        assert_eq!(
            mpp_to_scale(1.0002, ProviderType::AERIAL).map(ScaleLevel::value),
            Some(10)
        );
        // 4.008 is too far from the rung
        assert!(mpp_to_scale(1.002, ProviderType::AERIAL).is_none());
        // Truncation does not round up: 3.9996 becomes 3
        assert!(mpp_to_scale(0.9999, ProviderType::AERIAL).is_none());
    }

    #[test]
    fn test_scale_level_bounds() {
        assert!(ScaleLevel::new(7).is_none());
        assert!(ScaleLevel::new(8).is_some());
        assert!(ScaleLevel::new(19).is_some());
        assert!(ScaleLevel::new(20).is_none());
    }

    #[test]
    fn test_supported_resolutions() {
        assert_eq!(supported_resolutions(ProviderType::URBAN).len(), 12);
        assert_eq!(supported_resolutions(ProviderType::AERIAL)[0], 1.0);
        assert_eq!(supported_resolutions(ProviderType::TOPO)[0], 2.0);
        assert_eq!(supported_resolutions(ProviderType::TOPO).len(), 9);
    }

    proptest! {
        #[test]
        fn prop_every_level_roundtrips(level in ScaleLevel::MIN..=ScaleLevel::MAX) {
            let scale = ScaleLevel::new(level).unwrap();
            let mpp = scale_to_mpp(scale);
            prop_assert_eq!(mpp_to_scale(mpp, ProviderType::URBAN), Some(scale));
        }

        #[test]
        fn prop_result_is_on_ladder(mpp in 0.0f64..1000.0, ty in 0u8..8) {
            if let Some(scale) = mpp_to_scale(mpp, ProviderType::new(ty)) {
                prop_assert!((scale_to_mpp(scale) - mpp).abs() <= MARGIN_OF_ERROR / 4.0);
            }
        }
    }
}
