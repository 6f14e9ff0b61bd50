//! Triangle mesh data shared between the source scene and the build pipeline.
//!
//! Positions are in scene space so that meshes from different objects can be
//! concatenated directly during batching.

use glam::Vec3;

use crate::bounds::Aabb;

/// Compact identifier for a render material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaterialId(pub u16);

/// Vertex attribute layout of a mesh. Meshes can only be merged into one
/// draw unit when their formats match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VertexFormat {
    /// Positions only.
    Position,
    /// Positions and per-vertex normals.
    PositionNormal,
    /// Positions, normals, and texture coordinates.
    PositionNormalUv,
}

/// An indexed triangle mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    /// Vertex positions in scene space.
    pub positions: Vec<Vec3>,
    /// Triangle list indices; length is always a multiple of three.
    pub indices: Vec<u32>,
    /// Material applied to every triangle of this mesh.
    pub material: MaterialId,
    /// Vertex attribute layout.
    pub format: VertexFormat,
}

impl MeshData {
    pub fn new(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
        material: MaterialId,
        format: VertexFormat,
    ) -> Self {
        debug_assert!(indices.len() % 3 == 0, "index count must be a multiple of 3");
        Self {
            positions,
            indices,
            material,
            format,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Bounding box of the mesh positions.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshData {
        MeshData::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
            MaterialId(0),
            VertexFormat::Position,
        )
    }

    #[test]
    fn test_triangle_count() {
        assert_eq!(quad().triangle_count(), 2);
    }

    #[test]
    fn test_bounds_covers_positions() {
        let b = quad().bounds();
        assert_eq!(b.min, Vec3::ZERO);
        assert_eq!(b.max, Vec3::new(1.0, 1.0, 0.0));
    }
}
