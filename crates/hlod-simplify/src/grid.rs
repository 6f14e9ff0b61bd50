//! Vertex-clustering simplification on a uniform grid.

use glam::Vec3;
use rustc_hash::FxHashMap;

use hlod_core::{MeshData, StrategyConfig};

use crate::{Simplifier, SimplifyOutcome, SimplifyTarget};

/// Snaps vertices to a grid sized from the target ratio and collapses each
/// occupied cell to the average of its vertices. Triangles whose corners land
/// in fewer than three distinct cells are dropped.
///
/// Fully deterministic: cell assignment depends only on vertex positions and
/// the grid resolution derived from the target.
pub struct GridClusterSimplifier;

impl Simplifier for GridClusterSimplifier {
    fn simplify(
        &self,
        mesh: &MeshData,
        target: &SimplifyTarget,
        _options: &StrategyConfig,
    ) -> SimplifyOutcome {
        let input_triangles = mesh.triangle_count();
        let budget = target.target_triangles(input_triangles);
        if input_triangles <= budget {
            return SimplifyOutcome {
                mesh: mesh.clone(),
                budget_met: true,
            };
        }

        let resolution = resolution_for(mesh.vertex_count(), target.ratio);
        let bounds = mesh.bounds();
        let size = bounds.size().max(Vec3::splat(f32::EPSILON));
        let inv_cell = Vec3::splat(resolution as f32) / size;

        // cell -> cluster index, plus accumulated position per cluster.
        let mut cell_to_cluster: FxHashMap<(u32, u32, u32), u32> = FxHashMap::default();
        let mut cluster_sums: Vec<(Vec3, u32)> = Vec::new();
        let mut vertex_cluster = Vec::with_capacity(mesh.vertex_count());

        for &p in &mesh.positions {
            let local = (p - bounds.min) * inv_cell;
            let clamp = |v: f32| (v as u32).min(resolution - 1);
            let cell = (clamp(local.x), clamp(local.y), clamp(local.z));
            let cluster = *cell_to_cluster.entry(cell).or_insert_with(|| {
                cluster_sums.push((Vec3::ZERO, 0));
                (cluster_sums.len() - 1) as u32
            });
            let (sum, count) = &mut cluster_sums[cluster as usize];
            *sum += p;
            *count += 1;
            vertex_cluster.push(cluster);
        }

        let positions: Vec<Vec3> = cluster_sums
            .iter()
            .map(|&(sum, count)| sum / count as f32)
            .collect();

        let mut indices = Vec::new();
        for tri in mesh.indices.chunks_exact(3) {
            let a = vertex_cluster[tri[0] as usize];
            let b = vertex_cluster[tri[1] as usize];
            let c = vertex_cluster[tri[2] as usize];
            if a != b && b != c && a != c {
                indices.extend_from_slice(&[a, b, c]);
            }
        }

        let out = MeshData::new(positions, indices, mesh.material, mesh.format);
        let budget_met = out.triangle_count() <= budget;
        SimplifyOutcome {
            mesh: out,
            budget_met,
        }
    }
}

/// Grid resolution that clusters roughly `vertex_count * ratio` vertices.
fn resolution_for(vertex_count: usize, ratio: f32) -> u32 {
    let target_vertices = (vertex_count as f32 * ratio).max(3.0);
    (target_vertices.cbrt().ceil() as u32).clamp(1, 256)
}
