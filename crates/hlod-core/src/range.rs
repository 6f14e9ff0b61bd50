//! LOD distance range: where the runtime swaps from the high-detail root to
//! the low-detail root, and where it culls entirely.

use crate::error::SettingsError;

/// Validated pair of switch distances.
///
/// The high-detail root is shown up to `lod_distance`, the low-detail root
/// from there up to `cull_distance`, and nothing beyond.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LodRange {
    lod_distance: f32,
    cull_distance: f32,
}

impl LodRange {
    /// Creates a range, enforcing `0 <= lod_distance < cull_distance`.
    pub fn new(lod_distance: f32, cull_distance: f32) -> Result<Self, SettingsError> {
        if !lod_distance.is_finite() || lod_distance < 0.0 || lod_distance >= cull_distance {
            return Err(SettingsError::InvalidDistanceRange {
                lod: lod_distance,
                cull: cull_distance,
            });
        }
        Ok(Self {
            lod_distance,
            cull_distance,
        })
    }

    pub fn lod_distance(&self) -> f32 {
        self.lod_distance
    }

    pub fn cull_distance(&self) -> f32 {
        self.cull_distance
    }

    /// `true` if an observer at `distance` should see the high-detail root.
    pub fn is_high_detail(&self, distance: f32) -> bool {
        distance < self.lod_distance
    }

    /// `true` if an observer at `distance` sees nothing at all.
    pub fn is_culled(&self, distance: f32) -> bool {
        distance >= self.cull_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_range() {
        let range = LodRange::new(100.0, 500.0).unwrap();
        assert_eq!(range.lod_distance(), 100.0);
        assert_eq!(range.cull_distance(), 500.0);
    }

    #[test]
    fn test_lod_equal_to_cull_rejected() {
        assert!(matches!(
            LodRange::new(500.0, 500.0),
            Err(SettingsError::InvalidDistanceRange { .. })
        ));
    }

    #[test]
    fn test_lod_above_cull_rejected() {
        assert!(LodRange::new(600.0, 500.0).is_err());
    }

    #[test]
    fn test_negative_lod_rejected() {
        assert!(LodRange::new(-1.0, 500.0).is_err());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(LodRange::new(f32::NAN, 500.0).is_err());
    }

    #[test]
    fn test_detail_bands() {
        let range = LodRange::new(100.0, 500.0).unwrap();
        assert!(range.is_high_detail(50.0));
        assert!(!range.is_high_detail(100.0));
        assert!(!range.is_culled(499.0));
        assert!(range.is_culled(500.0));
    }
}
