//! Common packaging input and the high-root assembly shared by strategies.

use hlod_core::{Aabb, GroupId, HighNode, HighRoot, LodRange, MeshData};
use hlod_partition::PartitionGroup;

/// Simplified geometry produced for one leaf partition group.
#[derive(Clone, Debug, PartialEq)]
pub struct CellGeometry {
    pub group: GroupId,
    pub bounds: Aabb,
    /// One simplified mesh per batch of the group.
    pub meshes: Vec<MeshData>,
}

/// Everything a streaming strategy needs to assemble the roots.
pub struct PackageInput<'a> {
    /// The partition tree the build ran over.
    pub partition: &'a PartitionGroup,
    /// Simplified per-leaf geometry, in leaf pre-order.
    pub cells: &'a [CellGeometry],
    /// Switch/cull distances recorded on the low root.
    pub range: LodRange,
}

/// Builds the high-detail root by mirroring the partition tree; leaves keep
/// their references to the original scene objects.
pub fn build_high_root(partition: &PartitionGroup) -> HighRoot {
    HighRoot {
        root: mirror(partition),
    }
}

fn mirror(group: &PartitionGroup) -> HighNode {
    HighNode {
        group: group.id,
        bounds: group.bounds,
        members: group.members.clone(),
        children: group.children.iter().map(mirror).collect(),
    }
}
