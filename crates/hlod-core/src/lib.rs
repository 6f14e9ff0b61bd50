//! Core data model for the HLOD build pipeline: scene hierarchy, mesh data,
//! bounds math, build settings, generated roots, and the error taxonomy.

mod asset;
mod bounds;
mod error;
mod mesh;
mod range;
mod roots;
mod scene;
mod settings;
mod strategy;

pub use asset::{AssetId, BuildState, HlodAsset, HlodAssetHandle};
pub use bounds::Aabb;
pub use error::{BuildWarning, HlodError, SettingsError};
pub use mesh::{MaterialId, MeshData, VertexFormat};
pub use range::LodRange;
pub use roots::{ChunkKey, ChunkStore, HighNode, HighRoot, HlodRoots, LowCell, LowRoot, Payload};
pub use scene::{GroupId, ObjectId, Scene, SceneObject};
pub use settings::HlodSettings;
pub use strategy::{StrategyCategory, StrategyConfig};
