//! Batching engine: merges the meshes of one partition group into a reduced
//! set of draw-call-efficient batches via a pluggable [`Batcher`] strategy.

mod engine;
mod merge;
mod strategies;

pub use engine::{BatchInput, BatchingEngine, MeshBatch};
pub use merge::merge_meshes;
pub use strategies::{MaterialGroupBatcher, MergeAllBatcher};

use hlod_core::StrategyConfig;

/// A pluggable batching strategy.
///
/// Implementations cluster compatible meshes into fewer draw units. They may
/// differ in how they group materials, but every output batch must trace back
/// to a subset of the inputs and the total batch count must not exceed the
/// input count — the engine enforces both.
pub trait Batcher: Send + Sync {
    /// Merges the group's meshes into batches, or explains why it cannot.
    fn batch(
        &self,
        inputs: &[BatchInput<'_>],
        options: &StrategyConfig,
    ) -> Result<Vec<MeshBatch>, String>;
}
