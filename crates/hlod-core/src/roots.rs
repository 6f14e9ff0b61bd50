//! Generated build output: the high-detail and low-detail roots.
//!
//! Both roots live in one [`HlodRoots`] value so that "both present or both
//! absent" holds by construction — an asset stores `Option<HlodRoots>` and
//! only ever swaps it whole.

use crate::bounds::Aabb;
use crate::mesh::MeshData;
use crate::range::LodRange;
use crate::scene::{GroupId, ObjectId};

/// The pair of generated roots for one asset.
#[derive(Clone, Debug, PartialEq)]
pub struct HlodRoots {
    /// Close-range root preserving the partition structure and referencing
    /// the original scene meshes.
    pub high: HighRoot,
    /// Far-range root holding simplified, batched geometry and the distance
    /// range for switching and culling.
    pub low: LowRoot,
}

/// High-detail root: a tree mirroring the partition, whose leaves reference
/// the original member objects.
#[derive(Clone, Debug, PartialEq)]
pub struct HighRoot {
    pub root: HighNode,
}

/// One node of the high-detail tree.
#[derive(Clone, Debug, PartialEq)]
pub struct HighNode {
    pub group: GroupId,
    pub bounds: Aabb,
    /// Original scene objects rendered at close range for this group.
    /// Non-empty only on leaves.
    pub members: Vec<ObjectId>,
    pub children: Vec<HighNode>,
}

/// Low-detail root: one cell per leaf partition group.
#[derive(Clone, Debug, PartialEq)]
pub struct LowRoot {
    pub range: LodRange,
    pub cells: Vec<LowCell>,
    /// Backing store for chunked payloads; empty for resident layouts.
    pub chunks: ChunkStore,
}

impl LowRoot {
    /// Resolves a payload to its mesh, consulting the chunk store for
    /// chunked payloads. Returns `None` for a dangling chunk key.
    pub fn resolve<'a>(&'a self, payload: &'a Payload) -> Option<&'a MeshData> {
        match payload {
            Payload::Inline(mesh) => Some(mesh),
            Payload::Chunked(key) => self.chunks.get(*key),
        }
    }

    /// Total triangle count across all resolvable payloads.
    pub fn triangle_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|cell| cell.payloads.iter())
            .filter_map(|p| self.resolve(p))
            .map(MeshData::triangle_count)
            .sum()
    }
}

/// Simplified geometry for one leaf partition group.
#[derive(Clone, Debug, PartialEq)]
pub struct LowCell {
    pub group: GroupId,
    pub bounds: Aabb,
    /// One payload per batch produced for this group.
    pub payloads: Vec<Payload>,
}

/// Where a cell's geometry lives.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Geometry resident in memory, loaded eagerly with the asset.
    Inline(MeshData),
    /// Geometry stored in the chunk store, loaded on demand by key.
    Chunked(ChunkKey),
}

/// Key into a [`ChunkStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkKey(pub u32);

/// Dense store of on-demand mesh payloads, keyed by insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkStore {
    chunks: Vec<MeshData>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a mesh and returns its key.
    pub fn insert(&mut self, mesh: MeshData) -> ChunkKey {
        let key = ChunkKey(self.chunks.len() as u32);
        self.chunks.push(mesh);
        key
    }

    pub fn get(&self, key: ChunkKey) -> Option<&MeshData> {
        self.chunks.get(key.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
