//! Simplification engine: reduces triangle counts of batched geometry toward
//! a target budget via a pluggable [`Simplifier`] strategy.

mod collapse;
mod engine;
mod grid;

pub use collapse::EdgeCollapseSimplifier;
pub use engine::SimplificationEngine;
pub use grid::GridClusterSimplifier;

use hlod_core::{MeshData, StrategyConfig};

/// Triangle budget for one batch, expressed as a ratio of the batch's own
/// triangle count so nested groups simplify independently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimplifyTarget {
    pub ratio: f32,
}

impl SimplifyTarget {
    /// Option key every built-in simplifier understands.
    pub const RATIO_KEY: &'static str = "target_ratio";
    pub const DEFAULT_RATIO: f32 = 0.25;

    /// Reads the target ratio from strategy options, clamped to (0, 1].
    pub fn from_options(options: &StrategyConfig) -> Self {
        let ratio = options
            .get_f32(Self::RATIO_KEY)
            .unwrap_or(Self::DEFAULT_RATIO)
            .clamp(0.01, 1.0);
        Self { ratio }
    }

    /// Absolute triangle budget for a batch of `input_triangles`.
    pub fn target_triangles(&self, input_triangles: usize) -> usize {
        ((input_triangles as f32 * self.ratio).ceil() as usize).max(1)
    }
}

/// Result of one simplification run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimplifyOutcome {
    pub mesh: MeshData,
    /// `false` when the strategy returned its best achievable result without
    /// reaching the budget — a soft degradation, not a failure.
    pub budget_met: bool,
}

/// A pluggable simplification strategy.
///
/// Implementations must never increase the triangle count and should
/// preserve the input's bounding volume and silhouette within their
/// tolerance. A strategy that cannot meet the budget reports
/// `budget_met: false` instead of failing.
pub trait Simplifier: Send + Sync {
    fn simplify(
        &self,
        mesh: &MeshData,
        target: &SimplifyTarget,
        options: &StrategyConfig,
    ) -> SimplifyOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_from_options_with_default() {
        let target = SimplifyTarget::from_options(&StrategyConfig::default());
        assert_eq!(target.ratio, SimplifyTarget::DEFAULT_RATIO);
    }

    #[test]
    fn test_target_ratio_clamped() {
        let mut options = StrategyConfig::new();
        options.set(SimplifyTarget::RATIO_KEY, "7.5");
        assert_eq!(SimplifyTarget::from_options(&options).ratio, 1.0);

        options.set(SimplifyTarget::RATIO_KEY, "-2");
        assert_eq!(SimplifyTarget::from_options(&options).ratio, 0.01);
    }

    #[test]
    fn test_target_triangles_has_floor_of_one() {
        let target = SimplifyTarget { ratio: 0.01 };
        assert_eq!(target.target_triangles(1), 1);
        assert_eq!(target.target_triangles(1000), 10);
    }
}
