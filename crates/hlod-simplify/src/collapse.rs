//! Iterative shortest-edge-collapse simplification.

use glam::Vec3;
use rustc_hash::FxHashSet;

use hlod_core::{MeshData, StrategyConfig};

use crate::{Simplifier, SimplifyOutcome, SimplifyTarget};

/// Upper bound on collapse passes; each pass removes at least one triangle,
/// so this only matters for pathological budgets.
const MAX_PASSES: usize = 64;

/// Collapses the shortest edges first, moving the surviving vertex to the
/// edge midpoint, until the triangle budget is met or no further collapse is
/// possible. Edges are ordered by squared length with index tie-breaks, so
/// the result is deterministic for identical input.
pub struct EdgeCollapseSimplifier;

impl Simplifier for EdgeCollapseSimplifier {
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

        let mut positions = mesh.positions.clone();
        let mut indices = mesh.indices.clone();

        for _ in 0..MAX_PASSES {
            let triangles = indices.len() / 3;
            if triangles <= budget {
                break;
            }
            if !collapse_pass(&mut positions, &mut indices, triangles - budget) {
                break;
            }
        }

        let (positions, indices) = compact(&positions, &indices);
        let out = MeshData::new(positions, indices, mesh.material, mesh.format);
        let budget_met = out.triangle_count() <= budget;
        SimplifyOutcome {
            mesh: out,
            budget_met,
        }
    }
}

/// Collapses a disjoint set of the shortest edges. Returns `false` when no
/// collapse was possible (the pass made no progress).
fn collapse_pass(positions: &mut [Vec3], indices: &mut Vec<u32>, excess: usize) -> bool {
    // Unique undirected edges with squared lengths.
    let mut seen: FxHashSet<(u32, u32)> = FxHashSet::default();
    let mut edges: Vec<(f32, u32, u32)> = Vec::new();
    for tri in indices.chunks_exact(3) {
        for (i, j) in [(0, 1), (1, 2), (2, 0)] {
            let a = tri[i].min(tri[j]);
            let b = tri[i].max(tri[j]);
            if a != b && seen.insert((a, b)) {
                let len = positions[a as usize].distance_squared(positions[b as usize]);
                edges.push((len, a, b));
            }
        }
    }
    if edges.is_empty() {
        return false;
    }
    edges.sort_by(|x, y| x.0.total_cmp(&y.0).then(x.1.cmp(&y.1)).then(x.2.cmp(&y.2)));

    // Each collapse removes at least one, usually two, triangles.
    let max_collapses = excess.div_ceil(2).max(1);
    let mut touched: FxHashSet<u32> = FxHashSet::default();
    let mut remap: Vec<u32> = (0..positions.len() as u32).collect();
    let mut collapsed = 0;

    for &(_, keep, remove) in &edges {
        if collapsed >= max_collapses {
            break;
        }
        if touched.contains(&keep) || touched.contains(&remove) {
            continue;
        }
        touched.insert(keep);
        touched.insert(remove);
        positions[keep as usize] =
            (positions[keep as usize] + positions[remove as usize]) * 0.5;
        remap[remove as usize] = keep;
        collapsed += 1;
    }
    if collapsed == 0 {
        return false;
    }

    let mut rebuilt = Vec::with_capacity(indices.len());
    for tri in indices.chunks_exact(3) {
        let a = remap[tri[0] as usize];
        let b = remap[tri[1] as usize];
        let c = remap[tri[2] as usize];
        if a != b && b != c && a != c {
            rebuilt.extend_from_slice(&[a, b, c]);
        }
    }
    *indices = rebuilt;
    true
}

/// Drops unreferenced vertices and renumbers indices densely.
fn compact(positions: &[Vec3], indices: &[u32]) -> (Vec<Vec3>, Vec<u32>) {
    let mut new_index = vec![u32::MAX; positions.len()];
    let mut out_positions = Vec::new();
    let mut out_indices = Vec::with_capacity(indices.len());

    for &i in indices {
        if new_index[i as usize] == u32::MAX {
            new_index[i as usize] = out_positions.len() as u32;
            out_positions.push(positions[i as usize]);
        }
        out_indices.push(new_index[i as usize]);
    }
    (out_positions, out_indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hlod_core::{MaterialId, VertexFormat};

    fn grid_mesh(n: u32) -> MeshData {
        let mut positions = Vec::new();
        for y in 0..=n {
            for x in 0..=n {
                positions.push(Vec3::new(x as f32, y as f32, 0.0));
            }
        }
        let mut indices = Vec::new();
        let stride = n + 1;
        for y in 0..n {
            for x in 0..n {
                let i = y * stride + x;
                indices.extend_from_slice(&[i, i + 1, i + stride]);
                indices.extend_from_slice(&[i + 1, i + stride + 1, i + stride]);
            }
        }
        MeshData::new(positions, indices, MaterialId(0), VertexFormat::Position)
    }

    #[test]
    fn test_never_increases_triangles() {
        for ratio in [0.05, 0.3, 0.75, 1.0] {
            let mesh = grid_mesh(8);
            let outcome = EdgeCollapseSimplifier.simplify(
                &mesh,
                &SimplifyTarget { ratio },
                &StrategyConfig::default(),
            );
            assert!(outcome.mesh.triangle_count() <= mesh.triangle_count());
        }
    }

    #[test]
    fn test_meets_budget_on_dense_mesh() {
        let mesh = grid_mesh(10);
        let target = SimplifyTarget { ratio: 0.3 };
        let outcome =
            EdgeCollapseSimplifier.simplify(&mesh, &target, &StrategyConfig::default());
        let budget = target.target_triangles(mesh.triangle_count());
        assert!(outcome.mesh.triangle_count() <= budget);
        assert!(outcome.budget_met);
        assert!(outcome.mesh.triangle_count() > 0);
    }

    #[test]
    fn test_deterministic() {
        let mesh = grid_mesh(9);
        let target = SimplifyTarget { ratio: 0.2 };
        let a = EdgeCollapseSimplifier.simplify(&mesh, &target, &StrategyConfig::default());
        let b = EdgeCollapseSimplifier.simplify(&mesh, &target, &StrategyConfig::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_compact_drops_unreferenced_vertices() {
        let mesh = grid_mesh(6);
        let outcome = EdgeCollapseSimplifier.simplify(
            &mesh,
            &SimplifyTarget { ratio: 0.1 },
            &StrategyConfig::default(),
        );
        // Every vertex in the output must be referenced by some triangle.
        let referenced: FxHashSet<u32> = outcome.mesh.indices.iter().copied().collect();
        assert_eq!(referenced.len(), outcome.mesh.vertex_count());
    }

    #[test]
    fn test_single_triangle_is_untouched() {
        let mesh = MeshData::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![0, 1, 2],
            MaterialId(0),
            VertexFormat::Position,
        );
        let outcome = EdgeCollapseSimplifier.simplify(
            &mesh,
            &SimplifyTarget { ratio: 0.01 },
            &StrategyConfig::default(),
        );
        assert_eq!(outcome.mesh, mesh);
        assert!(outcome.budget_met);
    }
}
