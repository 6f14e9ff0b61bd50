//! Octree-style subdivision of the scene bounds.
//!
//! Group size is measured as the longest axis of the group's box. A group is
//! split while its size exceeds `threshold_size` and the split would not
//! produce groups below the `min_group_size` floor. Membership is decided by
//! the center of each mesh's bounds, children are emitted in fixed octant
//! order, and empty octants are pruned, so identical input always yields an
//! identical tree.

use glam::Vec3;
use log::debug;

use hlod_core::{Aabb, GroupId, HlodSettings, ObjectId, Scene};

/// Thresholds controlling the subdivision.
#[derive(Clone, Copy, Debug)]
pub struct PartitionParams {
    /// When `false` the whole hierarchy becomes a single leaf group.
    pub recursive: bool,
    /// Floor on group size; recursion stops here regardless of the threshold.
    pub min_group_size: f32,
    /// Groups larger than this are split.
    pub threshold_size: f32,
}

impl PartitionParams {
    pub fn from_settings(settings: &HlodSettings) -> Self {
        Self {
            recursive: settings.recursive_generation,
            min_group_size: settings.min_group_size,
            threshold_size: settings.threshold_size,
        }
    }
}

/// A node in the spatial-partition tree.
///
/// Members are stored on leaves only; a leaf is the unit handed to batching.
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionGroup {
    /// Pre-order index within the tree.
    pub id: GroupId,
    /// The spatial cell this group covers.
    pub bounds: Aabb,
    /// Mesh-bearing scene objects assigned to this group (leaves only).
    pub members: Vec<ObjectId>,
    /// Child groups in octant order.
    pub children: Vec<PartitionGroup>,
}

impl PartitionGroup {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// All leaf groups in pre-order.
    pub fn leaves(&self) -> Vec<&PartitionGroup> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a PartitionGroup>) {
        if self.is_leaf() {
            out.push(self);
        } else {
            for child in &self.children {
                child.collect_leaves(out);
            }
        }
    }

    /// Total number of groups in this subtree, including `self`.
    pub fn group_count(&self) -> usize {
        1 + self.children.iter().map(PartitionGroup::group_count).sum::<usize>()
    }

    fn assign_ids(&mut self, next: &mut u32) {
        self.id = GroupId(*next);
        *next += 1;
        for child in &mut self.children {
            child.assign_ids(next);
        }
    }
}

/// A mesh-bearing object flattened out of the hierarchy for assignment.
struct Member {
    object: ObjectId,
    center: Vec3,
    bounds: Aabb,
}

/// Builds the partition tree for a scene.
///
/// A scene without any mesh-bearing objects yields a single empty leaf; the
/// orchestrator skips empty leaves, so nothing reaches batching.
pub fn partition_scene(scene: &Scene, params: &PartitionParams) -> PartitionGroup {
    let members: Vec<Member> = scene
        .mesh_objects()
        .map(|(object, mesh)| {
            let bounds = mesh.bounds();
            Member {
                object,
                center: bounds.center(),
                bounds,
            }
        })
        .collect();

    let root_bounds = members
        .iter()
        .map(|m| m.bounds)
        .reduce(|a, b| a.union(&b))
        .unwrap_or(Aabb::new(Vec3::ZERO, Vec3::ZERO));

    let mut root = if params.recursive {
        subdivide(root_bounds, members, params)
    } else {
        PartitionGroup {
            id: GroupId(0),
            bounds: root_bounds,
            members: members.iter().map(|m| m.object).collect(),
            children: Vec::new(),
        }
    };

    let mut next = 0;
    root.assign_ids(&mut next);
    debug!(
        "partitioned scene into {} groups ({} leaves)",
        root.group_count(),
        root.leaves().len()
    );
    root
}

fn subdivide(bounds: Aabb, members: Vec<Member>, params: &PartitionParams) -> PartitionGroup {
    let size = bounds.longest_axis();
    let splittable = size > params.threshold_size && size * 0.5 >= params.min_group_size;

    if !splittable || members.len() <= 1 {
        return PartitionGroup {
            id: GroupId(0),
            bounds,
            members: members.iter().map(|m| m.object).collect(),
            children: Vec::new(),
        };
    }

    let center = bounds.center();
    let mut buckets: [Vec<Member>; 8] = Default::default();
    for member in members {
        buckets[octant_index(member.center, center)].push(member);
    }

    let mut children = Vec::new();
    for (octant, bucket) in buckets.into_iter().enumerate() {
        // Empty octants are pruned and never reach batching.
        if bucket.is_empty() {
            continue;
        }
        let child_bounds = octant_bounds(&bounds, octant);
        children.push(subdivide(child_bounds, bucket, params));
    }

    PartitionGroup {
        id: GroupId(0),
        bounds,
        members: Vec::new(),
        children,
    }
}

/// Octant index with x as the high bit and z as the low bit.
fn octant_index(point: Vec3, center: Vec3) -> usize {
    (usize::from(point.x >= center.x) << 2)
        | (usize::from(point.y >= center.y) << 1)
        | usize::from(point.z >= center.z)
}

/// The sub-box of `bounds` for a given octant index.
fn octant_bounds(bounds: &Aabb, octant: usize) -> Aabb {
    let center = bounds.center();
    let (min, max) = (bounds.min, bounds.max);
    let x = if octant & 4 != 0 { (center.x, max.x) } else { (min.x, center.x) };
    let y = if octant & 2 != 0 { (center.y, max.y) } else { (min.y, center.y) };
    let z = if octant & 1 != 0 { (center.z, max.z) } else { (min.z, center.z) };
    Aabb::new(Vec3::new(x.0, y.0, z.0), Vec3::new(x.1, y.1, z.1))
}
