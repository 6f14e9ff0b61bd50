//! Engine wrapper that runs a strategy and enforces its postconditions.

use log::debug;

use hlod_core::{GroupId, HlodError, MeshData, ObjectId, StrategyConfig};

use crate::Batcher;

/// One mesh of a leaf group, paired with its originating scene object.
#[derive(Clone, Copy)]
pub struct BatchInput<'a> {
    pub object: ObjectId,
    pub mesh: &'a MeshData,
}

/// A merged draw unit covering a subset of a group's meshes.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshBatch {
    pub mesh: MeshData,
    /// The scene objects whose geometry this batch contains.
    pub sources: Vec<ObjectId>,
}

/// Runs the selected batching strategy over leaf groups, verifying the
/// strategy contract: batch count never exceeds input count, and the union of
/// batch sources is exactly the group's member set.
pub struct BatchingEngine {
    strategy: Box<dyn Batcher>,
}

impl BatchingEngine {
    pub fn new(strategy: Box<dyn Batcher>) -> Self {
        Self { strategy }
    }

    /// Batches one leaf group. Any strategy failure or contract violation
    /// becomes [`HlodError::BatchingFailed`], which aborts the whole build.
    pub fn batch_group(
        &self,
        group: GroupId,
        inputs: &[BatchInput<'_>],
        options: &StrategyConfig,
    ) -> Result<Vec<MeshBatch>, HlodError> {
        let batches = self
            .strategy
            .batch(inputs, options)
            .map_err(|reason| HlodError::BatchingFailed { group, reason })?;

        if batches.len() > inputs.len() {
            return Err(HlodError::BatchingFailed {
                group,
                reason: format!(
                    "strategy produced {} batches from {} meshes",
                    batches.len(),
                    inputs.len()
                ),
            });
        }

        let mut expected: Vec<ObjectId> = inputs.iter().map(|i| i.object).collect();
        expected.sort();
        let mut covered: Vec<ObjectId> = batches
            .iter()
            .flat_map(|b| b.sources.iter().copied())
            .collect();
        covered.sort();
        if covered != expected {
            return Err(HlodError::BatchingFailed {
                group,
                reason: "batch sources do not cover the group's members exactly".to_string(),
            });
        }

        debug!(
            "group {group}: batched {} meshes into {} draw units",
            inputs.len(),
            batches.len()
        );
        Ok(batches)
    }
}
