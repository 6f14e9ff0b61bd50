//! Mesh concatenation shared by the built-in batchers.

use hlod_core::{MaterialId, MeshData, VertexFormat};

use crate::engine::BatchInput;

/// Concatenates meshes into one, rebasing indices.
///
/// All inputs must share `format`; the caller picks the output material.
/// Vertex data is not deduplicated — a batch exists to cut draw calls, not
/// memory.
pub fn merge_meshes(
    inputs: &[BatchInput<'_>],
    material: MaterialId,
    format: VertexFormat,
) -> MeshData {
    let vertex_total = inputs.iter().map(|i| i.mesh.vertex_count()).sum();
    let index_total = inputs.iter().map(|i| i.mesh.indices.len()).sum();

    let mut positions = Vec::with_capacity(vertex_total);
    let mut indices = Vec::with_capacity(index_total);

    for input in inputs {
        debug_assert_eq!(input.mesh.format, format);
        let base = positions.len() as u32;
        positions.extend_from_slice(&input.mesh.positions);
        indices.extend(input.mesh.indices.iter().map(|&i| base + i));
    }

    MeshData::new(positions, indices, material, format)
}
