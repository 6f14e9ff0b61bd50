//! Built-in batching strategies.

use rustc_hash::FxHashMap;

use hlod_core::{MaterialId, StrategyConfig, VertexFormat};

use crate::engine::{BatchInput, MeshBatch};
use crate::merge::merge_meshes;
use crate::Batcher;

/// Merges an entire group into a single batch.
///
/// Requires every mesh in the group to share one vertex format; fails
/// otherwise (there is no format fallback). The batch takes the lowest
/// material id present, on the assumption that the caller atlased or unified
/// materials beforehand.
pub struct MergeAllBatcher;

impl Batcher for MergeAllBatcher {
    fn batch(
        &self,
        inputs: &[BatchInput<'_>],
        _options: &StrategyConfig,
    ) -> Result<Vec<MeshBatch>, String> {
        let Some(first) = inputs.first() else {
            return Ok(Vec::new());
        };

        let format = first.mesh.format;
        if let Some(other) = inputs.iter().find(|i| i.mesh.format != format) {
            return Err(format!(
                "cannot merge {:?} and {:?} vertex formats into one batch",
                format, other.mesh.format
            ));
        }

        let material = inputs
            .iter()
            .map(|i| i.mesh.material)
            .min()
            .unwrap_or(MaterialId(0));

        Ok(vec![MeshBatch {
            mesh: merge_meshes(inputs, material, format),
            sources: inputs.iter().map(|i| i.object).collect(),
        }])
    }
}

/// Emits one batch per `(material, vertex format)` pair.
///
/// Keys are processed in ascending order so the batch order is deterministic.
/// Never fails: any mesh is compatible with itself.
pub struct MaterialGroupBatcher;

impl Batcher for MaterialGroupBatcher {
    fn batch(
        &self,
        inputs: &[BatchInput<'_>],
        _options: &StrategyConfig,
    ) -> Result<Vec<MeshBatch>, String> {
        let mut groups: FxHashMap<(MaterialId, VertexFormat), Vec<BatchInput<'_>>> =
            FxHashMap::default();
        for &input in inputs {
            groups
                .entry((input.mesh.material, input.mesh.format))
                .or_default()
                .push(input);
        }

        let mut keys: Vec<(MaterialId, VertexFormat)> = groups.keys().copied().collect();
        keys.sort();

        Ok(keys
            .into_iter()
            .map(|key| {
                let members = &groups[&key];
                MeshBatch {
                    mesh: merge_meshes(members, key.0, key.1),
                    sources: members.iter().map(|i| i.object).collect(),
                }
            })
            .collect())
    }
}
