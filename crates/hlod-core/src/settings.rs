//! Build settings with sensible defaults, validation, and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::range::LodRange;
use crate::strategy::StrategyConfig;

/// Per-asset HLOD build configuration, supplied by the caller.
///
/// Unknown strategy options travel in the `*_options` maps and are passed to
/// the selected strategy unchanged; the orchestrator never interprets them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HlodSettings {
    /// Recursively subdivide the hierarchy into spatial groups. When `false`
    /// the whole hierarchy is built as a single group.
    pub recursive_generation: bool,
    /// Floor on group size: subdivision stops once a split would produce
    /// groups smaller than this.
    pub min_group_size: f32,
    /// Distance at which the runtime swaps from the high-detail root to the
    /// low-detail root.
    pub lod_distance: f32,
    /// Distance at which the low-detail root is culled entirely. Must exceed
    /// `lod_distance`.
    pub cull_distance: f32,
    /// A group is split while its bounding size exceeds this threshold.
    pub threshold_size: f32,
    /// Selected batching strategy, by registry name.
    pub batcher: String,
    /// Selected simplification strategy, by registry name.
    pub simplifier: String,
    /// Selected streaming strategy, by registry name.
    pub streaming: String,
    /// Free-form options for the selected batcher.
    pub batcher_options: StrategyConfig,
    /// Free-form options for the selected simplifier.
    pub simplifier_options: StrategyConfig,
    /// Free-form options for the selected streaming strategy.
    pub streaming_options: StrategyConfig,
}

impl Default for HlodSettings {
    fn default() -> Self {
        Self {
            recursive_generation: true,
            min_group_size: 30.0,
            lod_distance: 100.0,
            cull_distance: 500.0,
            threshold_size: 50.0,
            batcher: "material-group".to_string(),
            simplifier: "grid-cluster".to_string(),
            streaming: "resident".to_string(),
            batcher_options: StrategyConfig::default(),
            simplifier_options: StrategyConfig::default(),
            streaming_options: StrategyConfig::default(),
        }
    }
}

impl HlodSettings {
    /// Validates numeric constraints: positive sizes and a well-ordered
    /// distance range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.min_group_size > 0.0) {
            return Err(SettingsError::NonPositiveMinGroupSize(self.min_group_size));
        }
        if !(self.threshold_size > 0.0) {
            return Err(SettingsError::NonPositiveThresholdSize(self.threshold_size));
        }
        self.lod_range().map(|_| ())
    }

    /// The validated distance range described by these settings.
    pub fn lod_range(&self) -> Result<LodRange, SettingsError> {
        LodRange::new(self.lod_distance, self.cull_distance)
    }

    /// Loads settings from a RON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(SettingsError::Read)?;
        ron::from_str(&contents).map_err(SettingsError::Parse)
    }

    /// Saves settings to a RON file, pretty-printed.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let pretty = ron::ser::PrettyConfig::default();
        let contents =
            ron::ser::to_string_pretty(self, pretty).map_err(SettingsError::Serialize)?;
        std::fs::write(path, contents).map_err(SettingsError::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(HlodSettings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_min_group_size_rejected() {
        let settings = HlodSettings {
            min_group_size: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NonPositiveMinGroupSize(_))
        ));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let settings = HlodSettings {
            threshold_size: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NonPositiveThresholdSize(_))
        ));
    }

    #[test]
    fn test_inverted_distances_rejected() {
        let settings = HlodSettings {
            lod_distance: 500.0,
            cull_distance: 100.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidDistanceRange { .. })
        ));
    }

    #[test]
    fn test_ron_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hlod.ron");

        let mut settings = HlodSettings {
            recursive_generation: false,
            threshold_size: 12.5,
            batcher: "merge-all".to_string(),
            ..Default::default()
        };
        settings
            .simplifier_options
            .set("target_ratio", "0.1");

        settings.save(&path).unwrap();
        let loaded = HlodSettings::load(&path).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let loaded: HlodSettings = ron::from_str("(threshold_size: 25.0)").unwrap();
        assert_eq!(loaded.threshold_size, 25.0);
        assert_eq!(loaded.batcher, "material-group");
        assert!(loaded.recursive_generation);
    }
}
