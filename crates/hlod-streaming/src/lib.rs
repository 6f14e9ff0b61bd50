//! Streaming packager: assembles the generated LOD chain into the final
//! high/low roots via a pluggable [`StreamingLayout`] strategy.

mod package;
mod strategies;

pub use package::{CellGeometry, PackageInput, build_high_root};
pub use strategies::{OnDemandStreaming, ResidentStreaming};

use hlod_core::{HlodRoots, StrategyConfig};

/// A pluggable streaming strategy.
///
/// Implementations decide where the low root's geometry lives: resident in
/// memory for eager loading, or behind chunk keys for on-demand loading.
/// The high root layout is common to all strategies.
pub trait StreamingLayout: Send + Sync {
    fn package(&self, input: &PackageInput<'_>, options: &StrategyConfig) -> HlodRoots;
}
