//! The HLOD asset record and its thread-safe handle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::HlodError;
use crate::roots::HlodRoots;
use crate::settings::HlodSettings;

/// Process-unique asset identifier, assigned when a handle is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AssetId(pub u64);

/// Lifecycle state of an asset's build.
///
/// `Generate` is valid only from `Idle`; `Update` and `Destroy` only from
/// `Built`; `Failed` must be acknowledged before retrying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    Partitioning,
    Batching,
    Simplifying,
    Packaging,
    Built,
    Destroying,
    Failed,
}

impl BuildState {
    /// `true` while a build task owns the asset.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Self::Partitioning
                | Self::Batching
                | Self::Simplifying
                | Self::Packaging
                | Self::Destroying
        )
    }
}

impl std::fmt::Display for BuildState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Partitioning => "partitioning",
            Self::Batching => "batching",
            Self::Simplifying => "simplifying",
            Self::Packaging => "packaging",
            Self::Built => "built",
            Self::Destroying => "destroying",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Persistent configuration plus generated output for one hierarchy root.
///
/// The generated roots are a single `Option<HlodRoots>` assigned in one
/// statement, so readers can never observe one root without the other.
#[derive(Debug)]
pub struct HlodAsset {
    pub settings: HlodSettings,
    state: BuildState,
    roots: Option<HlodRoots>,
    failure: Option<String>,
}

impl HlodAsset {
    pub fn new(settings: HlodSettings) -> Self {
        Self {
            settings,
            state: BuildState::Idle,
            roots: None,
            failure: None,
        }
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn roots(&self) -> Option<&HlodRoots> {
        self.roots.as_ref()
    }

    pub fn has_roots(&self) -> bool {
        self.roots.is_some()
    }

    /// Reason recorded by the last failed build, if any.
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Marks the asset as being in the given active phase. Called by the
    /// build worker at phase boundaries.
    pub fn set_state(&mut self, state: BuildState) {
        self.state = state;
    }

    /// Atomically replaces the generated roots and marks the asset built.
    /// Both roots swap together; a concurrent reader sees either the old
    /// pair or the new pair.
    pub fn install_roots(&mut self, roots: HlodRoots) {
        self.roots = Some(roots);
        self.state = BuildState::Built;
        self.failure = None;
    }

    /// Removes both roots, returning the asset to `Idle`.
    pub fn take_roots(&mut self) -> Option<HlodRoots> {
        self.state = BuildState::Idle;
        self.roots.take()
    }

    /// Records a failure or cancellation. The roots are left exactly as they
    /// were before the build started.
    pub fn mark_failed(&mut self, reason: String) {
        self.state = BuildState::Failed;
        self.failure = Some(reason);
    }

    /// Acknowledges a failure, returning the asset to the state implied by
    /// its roots (`Built` if present, `Idle` otherwise).
    pub fn acknowledge_failure(&mut self) -> Result<(), HlodError> {
        if self.state != BuildState::Failed {
            return Err(HlodError::InvalidStateTransition {
                state: self.state,
                operation: "acknowledge_failure",
            });
        }
        self.state = if self.roots.is_some() {
            BuildState::Built
        } else {
            BuildState::Idle
        };
        self.failure = None;
        Ok(())
    }
}

static NEXT_ASSET_ID: AtomicU64 = AtomicU64::new(0);

/// Cloneable, thread-safe handle to an asset.
///
/// Build workers take the write lock only for brief state transitions and
/// the final root install; readers may sample at any time.
#[derive(Clone)]
pub struct HlodAssetHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    id: AssetId,
    asset: RwLock<HlodAsset>,
}

impl HlodAssetHandle {
    pub fn new(settings: HlodSettings) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                id: AssetId(NEXT_ASSET_ID.fetch_add(1, Ordering::Relaxed)),
                asset: RwLock::new(HlodAsset::new(settings)),
            }),
        }
    }

    pub fn id(&self) -> AssetId {
        self.inner.id
    }

    /// Read access to the asset. A poisoned lock is recovered by taking the
    /// inner value; the asset's invariants hold across panics because roots
    /// are only ever swapped whole.
    pub fn read(&self) -> RwLockReadGuard<'_, HlodAsset> {
        self.inner
            .asset
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Write access to the asset. See [`read`](Self::read) on poisoning.
    pub fn write(&self) -> RwLockWriteGuard<'_, HlodAsset> {
        self.inner
            .asset
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Aabb;
    use crate::range::LodRange;
    use crate::roots::{ChunkStore, HighNode, HighRoot, LowRoot};
    use crate::scene::GroupId;

    fn empty_roots() -> HlodRoots {
        HlodRoots {
            high: HighRoot {
                root: HighNode {
                    group: GroupId(0),
                    bounds: Aabb::default(),
                    members: Vec::new(),
                    children: Vec::new(),
                },
            },
            low: LowRoot {
                range: LodRange::new(100.0, 500.0).unwrap(),
                cells: Vec::new(),
                chunks: ChunkStore::new(),
            },
        }
    }

    #[test]
    fn test_new_asset_is_idle_without_roots() {
        let asset = HlodAsset::new(HlodSettings::default());
        assert_eq!(asset.state(), BuildState::Idle);
        assert!(!asset.has_roots());
    }

    #[test]
    fn test_install_and_take_roots() {
        let mut asset = HlodAsset::new(HlodSettings::default());
        asset.install_roots(empty_roots());
        assert_eq!(asset.state(), BuildState::Built);
        assert!(asset.has_roots());

        assert!(asset.take_roots().is_some());
        assert_eq!(asset.state(), BuildState::Idle);
        assert!(!asset.has_roots());
    }

    #[test]
    fn test_failure_preserves_roots_and_acknowledge_restores_state() {
        let mut asset = HlodAsset::new(HlodSettings::default());
        asset.install_roots(empty_roots());
        asset.mark_failed("batching failed".to_string());
        assert_eq!(asset.state(), BuildState::Failed);
        assert!(asset.has_roots());
        assert_eq!(asset.failure_reason(), Some("batching failed"));

        asset.acknowledge_failure().unwrap();
        assert_eq!(asset.state(), BuildState::Built);
    }

    #[test]
    fn test_acknowledge_without_failure_rejected() {
        let mut asset = HlodAsset::new(HlodSettings::default());
        assert!(matches!(
            asset.acknowledge_failure(),
            Err(HlodError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_handles_get_unique_ids() {
        let a = HlodAssetHandle::new(HlodSettings::default());
        let b = HlodAssetHandle::new(HlodSettings::default());
        assert_ne!(a.id(), b.id());
    }
}
