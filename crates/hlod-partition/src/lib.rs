//! Spatial partitioner: recursively subdivides a scene's mesh hierarchy into
//! a deterministic tree of groups by bounding-volume size thresholds.

mod octree;

pub use octree::{PartitionGroup, PartitionParams, partition_scene};
