//! Entry points for generate, update, and destroy.
//!
//! The orchestrator owns an active-task table keyed by asset id. An entry is
//! reserved synchronously before any validation, so at most one build can
//! ever be in flight per asset; every pre-spawn failure removes the entry and
//! leaves the asset exactly as it was.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crossbeam_channel::{bounded, unbounded};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use log::info;

use hlod_batch::BatchingEngine;
use hlod_core::{
    AssetId, BuildState, HlodAssetHandle, HlodError, HlodSettings, LodRange, Scene,
};
use hlod_simplify::SimplificationEngine;

use crate::build::{BuildContext, ResolvedStrategies, run_pipeline};
use crate::registry::StrategyRegistry;
use crate::state::{Operation, check_entry};
use crate::task::{BuildProgress, BuildReport, BuildTask};

/// Drives asset builds over a shared strategy registry.
pub struct Orchestrator {
    registry: Arc<StrategyRegistry>,
    active: Arc<DashMap<AssetId, Arc<AtomicBool>>>,
}

/// Releases the asset's active-table entry on drop, so an unwinding worker
/// can never leak the reservation and wedge the asset.
struct ActiveGuard {
    active: Arc<DashMap<AssetId, Arc<AtomicBool>>>,
    id: AssetId,
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.active.remove(&self.id);
    }
}

/// Best-effort message out of a caught panic payload.
fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "strategy panicked".to_string()
    }
}

impl Orchestrator {
    /// Creates an orchestrator over the built-in strategies.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(StrategyRegistry::with_builtins()))
    }

    pub fn with_registry(registry: Arc<StrategyRegistry>) -> Self {
        Self {
            registry,
            active: Arc::new(DashMap::new()),
        }
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Builds the hierarchy for the first time. Valid only while the asset is
    /// `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`HlodError::BuildAlreadyInProgress`] when a task for this
    /// asset is active, [`HlodError::InvalidStateTransition`] from any state
    /// but `Idle`, a settings or registry error from validation — all before
    /// any work starts or any asset state changes.
    pub fn generate(
        &self,
        handle: &HlodAssetHandle,
        scene: &Arc<Scene>,
    ) -> Result<BuildTask, HlodError> {
        self.start_build(handle, scene, Operation::Generate)
    }

    /// Rebuilds the hierarchy in place. Valid only while the asset is
    /// `Built`; the previous roots stay installed (and visible to readers)
    /// until the rebuild succeeds. Errors as [`generate`](Self::generate).
    pub fn update(
        &self,
        handle: &HlodAssetHandle,
        scene: &Arc<Scene>,
    ) -> Result<BuildTask, HlodError> {
        self.start_build(handle, scene, Operation::Update)
    }

    /// Removes the generated roots, returning the asset to `Idle`. The source
    /// scene is never modified by a build, so dropping the roots fully
    /// restores it. Errors as [`generate`](Self::generate).
    pub fn destroy(&self, handle: &HlodAssetHandle) -> Result<BuildTask, HlodError> {
        let id = handle.id();
        let cancel = self.reserve(id)?;

        if let Err(err) = check_entry(handle.read().state(), Operation::Destroy) {
            self.active.remove(&id);
            return Err(err);
        }

        let (progress_tx, progress_rx) = unbounded();
        let (result_tx, result_rx) = bounded(1);
        let task = BuildTask::new(
            id,
            Operation::Destroy,
            Arc::clone(&cancel),
            progress_rx,
            result_rx,
        );

        let handle = handle.clone();
        let active = Arc::clone(&self.active);
        std::thread::Builder::new()
            .name(format!("hlod-destroy-{}", id.0))
            .spawn(move || {
                let guard = ActiveGuard { active, id };
                let started = Instant::now();
                handle.write().set_state(BuildState::Destroying);
                let _ = progress_tx.send(BuildProgress {
                    phase: BuildState::Destroying,
                    groups_done: 0,
                    groups_total: 1,
                });

                let result = if cancel.load(Ordering::Relaxed) {
                    handle.write().mark_failed(HlodError::Cancelled.to_string());
                    Err(HlodError::Cancelled)
                } else {
                    // take_roots drops both roots in one swap and lands Idle.
                    drop(handle.write().take_roots());
                    info!("destroyed hierarchy for asset {}", id.0);
                    Ok(BuildReport {
                        operation: Operation::Destroy,
                        groups: 0,
                        batches: 0,
                        input_triangles: 0,
                        output_triangles: 0,
                        warnings: Vec::new(),
                        elapsed: started.elapsed(),
                    })
                };
                // Deregister before reporting, so a caller returning from
                // wait() always observes the slot free.
                drop(guard);
                let _ = result_tx.send(result);
            })
            .expect("Failed to spawn HLOD destroy worker thread");

        Ok(task)
    }

    /// Requests cancellation of the asset's active task, if any. Returns
    /// `true` when a task was flagged; completion may still race the flag.
    pub fn cancel(&self, asset: AssetId) -> bool {
        match self.active.get(&asset) {
            Some(flag) => {
                flag.store(true, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// `true` while a task for the asset is queued or running.
    pub fn is_building(&self, asset: AssetId) -> bool {
        self.active.contains_key(&asset)
    }

    /// Reserves the asset's slot in the active table.
    fn reserve(&self, id: AssetId) -> Result<Arc<AtomicBool>, HlodError> {
        match self.active.entry(id) {
            Entry::Occupied(_) => Err(HlodError::BuildAlreadyInProgress),
            Entry::Vacant(vacant) => {
                let cancel = Arc::new(AtomicBool::new(false));
                vacant.insert(Arc::clone(&cancel));
                Ok(cancel)
            }
        }
    }

    fn start_build(
        &self,
        handle: &HlodAssetHandle,
        scene: &Arc<Scene>,
        operation: Operation,
    ) -> Result<BuildTask, HlodError> {
        let id = handle.id();
        let cancel = self.reserve(id)?;

        let (settings, range, strategies) = match self.prepare(handle, operation) {
            Ok(prepared) => prepared,
            Err(err) => {
                self.active.remove(&id);
                return Err(err);
            }
        };

        let (progress_tx, progress_rx) = unbounded();
        let (result_tx, result_rx) = bounded(1);
        let task = BuildTask::new(
            id,
            operation,
            Arc::clone(&cancel),
            progress_rx,
            result_rx,
        );

        let ctx = BuildContext {
            operation,
            handle: handle.clone(),
            scene: Arc::clone(scene),
            settings,
            range,
            strategies,
            cancel,
            progress: progress_tx,
        };
        let active = Arc::clone(&self.active);
        std::thread::Builder::new()
            .name(format!("hlod-build-{}", id.0))
            .spawn(move || {
                let guard = ActiveGuard { active, id };
                // Strategies are third-party extension points; a panic in one
                // must roll the asset back like any other failure instead of
                // wedging it. Root installs are whole-value swaps, so the
                // asset's invariants hold across an unwind.
                let outcome = catch_unwind(AssertUnwindSafe(|| run_pipeline(&ctx)));
                let result = match outcome {
                    Ok(Ok((roots, report))) => {
                        // One write installs both roots and flips to Built.
                        ctx.handle.write().install_roots(roots);
                        Ok(report)
                    }
                    Ok(Err(err)) => {
                        ctx.handle.write().mark_failed(err.to_string());
                        Err(err)
                    }
                    Err(payload) => {
                        let err = HlodError::WorkerPanicked(panic_reason(payload.as_ref()));
                        ctx.handle.write().mark_failed(err.to_string());
                        Err(err)
                    }
                };
                // Deregister before reporting, so a caller returning from
                // wait() always observes the slot free.
                drop(guard);
                let _ = result_tx.send(result);
            })
            .expect("Failed to spawn HLOD build worker thread");

        Ok(task)
    }

    /// Validates the request and resolves strategies without touching the
    /// asset; any error here leaves no trace.
    fn prepare(
        &self,
        handle: &HlodAssetHandle,
        operation: Operation,
    ) -> Result<(HlodSettings, LodRange, ResolvedStrategies), HlodError> {
        let settings = {
            let asset = handle.read();
            check_entry(asset.state(), operation)?;
            asset.settings.clone()
        };
        settings.validate()?;
        let range = settings.lod_range()?;

        let strategies = ResolvedStrategies {
            batching: BatchingEngine::new(self.registry.create_batcher(&settings.batcher)?),
            simplification: SimplificationEngine::new(
                self.registry.create_simplifier(&settings.simplifier)?,
            ),
            streaming: self.registry.create_streaming(&settings.streaming)?,
        };
        Ok((settings, range, strategies))
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StrategyDescriptor;
    use glam::Vec3;
    use hlod_batch::{BatchInput, Batcher, MaterialGroupBatcher, MeshBatch};
    use hlod_core::{MaterialId, MeshData, StrategyConfig, VertexFormat};
    use std::time::Duration;

    fn unit_cube_at(center: Vec3) -> Arc<MeshData> {
        let h = 0.5;
        let positions = vec![
            center + Vec3::new(-h, -h, -h),
            center + Vec3::new(h, -h, -h),
            center + Vec3::new(h, h, -h),
            center + Vec3::new(-h, h, -h),
            center + Vec3::new(-h, -h, h),
            center + Vec3::new(h, -h, h),
            center + Vec3::new(h, h, h),
            center + Vec3::new(-h, h, h),
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 1, 2, 0, 2, 3, 4, 6, 5, 4, 7, 6,
            0, 4, 5, 0, 5, 1, 3, 2, 6, 3, 6, 7,
            0, 3, 7, 0, 7, 4, 1, 5, 6, 1, 6, 2,
        ];
        Arc::new(MeshData::new(
            positions,
            indices,
            MaterialId(0),
            VertexFormat::Position,
        ))
    }

    fn grid_scene(count: usize, spacing: f32) -> Arc<Scene> {
        let mut scene = Scene::new("root");
        let side = (count as f32).sqrt().ceil() as usize;
        for i in 0..count {
            let x = (i % side) as f32 * spacing;
            let z = (i / side) as f32 * spacing;
            let id = scene.add_object(scene.root(), format!("mesh-{i}"));
            scene.set_mesh(id, unit_cube_at(Vec3::new(x, 0.0, z)));
        }
        Arc::new(scene)
    }

    fn test_settings() -> HlodSettings {
        HlodSettings {
            min_group_size: 5.0,
            threshold_size: 10.0,
            ..Default::default()
        }
    }

    /// Batcher that sleeps per group before delegating, to hold builds open
    /// long enough for concurrency assertions.
    struct SlowBatcher;

    impl Batcher for SlowBatcher {
        fn batch(
            &self,
            inputs: &[BatchInput<'_>],
            options: &StrategyConfig,
        ) -> Result<Vec<MeshBatch>, String> {
            std::thread::sleep(Duration::from_millis(30));
            MaterialGroupBatcher.batch(inputs, options)
        }
    }

    fn slow_registry() -> Arc<StrategyRegistry> {
        let mut registry = StrategyRegistry::with_builtins();
        registry
            .register_batcher(
                StrategyDescriptor {
                    name: "slow",
                    options: &[],
                },
                || Box::new(SlowBatcher),
            )
            .unwrap();
        Arc::new(registry)
    }

    fn slow_settings() -> HlodSettings {
        HlodSettings {
            batcher: "slow".to_string(),
            ..test_settings()
        }
    }

    #[test]
    fn test_generate_builds_both_roots() {
        let orchestrator = Orchestrator::new();
        let scene = grid_scene(100, 2.0);
        let handle = HlodAssetHandle::new(test_settings());

        let report = orchestrator.generate(&handle, &scene).unwrap().wait().unwrap();
        assert!(report.groups > 1, "expected a subdivided hierarchy");
        assert!(report.output_triangles <= report.input_triangles);
        assert_eq!(report.input_triangles, 100 * 12);

        let asset = handle.read();
        assert_eq!(asset.state(), BuildState::Built);
        let roots = asset.roots().unwrap();

        // Every scene object lands in exactly one high-root leaf.
        fn collect(node: &hlod_core::HighNode, out: &mut Vec<hlod_core::ObjectId>) {
            out.extend(node.members.iter().copied());
            for child in &node.children {
                collect(child, out);
            }
        }
        let mut members = Vec::new();
        collect(&roots.high.root, &mut members);
        members.sort();
        members.dedup();
        assert_eq!(members.len(), 100);
        assert!(!roots.low.cells.is_empty());
    }

    #[test]
    fn test_generate_then_destroy_restores_idle() {
        let orchestrator = Orchestrator::new();
        let scene = grid_scene(20, 3.0);
        let snapshot = (*scene).clone();
        let handle = HlodAssetHandle::new(test_settings());

        orchestrator.generate(&handle, &scene).unwrap().wait().unwrap();
        assert!(handle.read().has_roots());

        orchestrator.destroy(&handle).unwrap().wait().unwrap();
        let asset = handle.read();
        assert_eq!(asset.state(), BuildState::Idle);
        assert!(!asset.has_roots());
        // Builds never touch the source scene.
        assert_eq!(*scene, snapshot);
    }

    #[test]
    fn test_update_rebuilds_deterministically() {
        let orchestrator = Orchestrator::new();
        let scene = grid_scene(50, 2.5);
        let handle = HlodAssetHandle::new(test_settings());

        orchestrator.generate(&handle, &scene).unwrap().wait().unwrap();
        let first = handle.read().roots().unwrap().clone();

        orchestrator.update(&handle, &scene).unwrap().wait().unwrap();
        let second = handle.read().roots().unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_update_and_destroy_require_built() {
        let orchestrator = Orchestrator::new();
        let scene = grid_scene(5, 3.0);
        let handle = HlodAssetHandle::new(test_settings());

        assert!(matches!(
            orchestrator.update(&handle, &scene),
            Err(HlodError::InvalidStateTransition { operation: "update", .. })
        ));
        assert!(matches!(
            orchestrator.destroy(&handle),
            Err(HlodError::InvalidStateTransition { operation: "destroy", .. })
        ));
        assert!(!orchestrator.is_building(handle.id()));
    }

    #[test]
    fn test_generate_twice_rejected_once_built() {
        let orchestrator = Orchestrator::new();
        let scene = grid_scene(10, 3.0);
        let handle = HlodAssetHandle::new(test_settings());

        orchestrator.generate(&handle, &scene).unwrap().wait().unwrap();
        assert!(matches!(
            orchestrator.generate(&handle, &scene),
            Err(HlodError::InvalidStateTransition { operation: "generate", .. })
        ));
    }

    #[test]
    fn test_concurrent_build_on_same_asset_rejected() {
        let orchestrator = Orchestrator::with_registry(slow_registry());
        let scene = grid_scene(50, 2.5);
        let handle = HlodAssetHandle::new(slow_settings());

        let task = orchestrator.generate(&handle, &scene).unwrap();
        assert!(orchestrator.is_building(handle.id()));
        assert!(matches!(
            orchestrator.generate(&handle, &scene),
            Err(HlodError::BuildAlreadyInProgress)
        ));

        task.wait().unwrap();
        assert!(!orchestrator.is_building(handle.id()));
        assert_eq!(handle.read().state(), BuildState::Built);
    }

    #[test]
    fn test_cancel_rolls_back_without_partial_output() {
        let orchestrator = Orchestrator::with_registry(slow_registry());
        let scene = grid_scene(100, 2.0);
        let handle = HlodAssetHandle::new(slow_settings());

        let task = orchestrator.generate(&handle, &scene).unwrap();
        task.cancel();
        assert!(matches!(task.wait(), Err(HlodError::Cancelled)));

        let mut asset = handle.write();
        assert_eq!(asset.state(), BuildState::Failed);
        assert!(!asset.has_roots());
        assert!(asset.failure_reason().unwrap().contains("cancelled"));

        asset.acknowledge_failure().unwrap();
        assert_eq!(asset.state(), BuildState::Idle);
        drop(asset);

        // The asset is fully reusable after acknowledgement.
        orchestrator.generate(&handle, &scene).unwrap().wait().unwrap();
        assert!(handle.read().has_roots());
    }

    #[test]
    fn test_cancelled_update_keeps_previous_roots() {
        let orchestrator = Orchestrator::with_registry(slow_registry());
        let scene = grid_scene(100, 2.0);
        let handle = HlodAssetHandle::new(test_settings());

        orchestrator.generate(&handle, &scene).unwrap().wait().unwrap();
        let before = handle.read().roots().unwrap().clone();

        handle.write().settings.batcher = "slow".to_string();
        let task = orchestrator.update(&handle, &scene).unwrap();
        orchestrator.cancel(handle.id());
        assert!(matches!(task.wait(), Err(HlodError::Cancelled)));

        let mut asset = handle.write();
        assert_eq!(asset.state(), BuildState::Failed);
        assert_eq!(asset.roots(), Some(&before));

        asset.acknowledge_failure().unwrap();
        assert_eq!(asset.state(), BuildState::Built);
    }

    /// Batcher that panics on first use, standing in for a buggy plugin.
    struct PanickingBatcher;

    impl Batcher for PanickingBatcher {
        fn batch(
            &self,
            _inputs: &[BatchInput<'_>],
            _options: &StrategyConfig,
        ) -> Result<Vec<MeshBatch>, String> {
            panic!("plugin blew up");
        }
    }

    #[test]
    fn test_panicking_strategy_rolls_back_and_frees_the_asset() {
        let mut registry = StrategyRegistry::with_builtins();
        registry
            .register_batcher(
                StrategyDescriptor {
                    name: "panicking",
                    options: &[],
                },
                || Box::new(PanickingBatcher),
            )
            .unwrap();
        let orchestrator = Orchestrator::with_registry(Arc::new(registry));
        let scene = grid_scene(10, 3.0);
        let handle = HlodAssetHandle::new(HlodSettings {
            batcher: "panicking".to_string(),
            ..test_settings()
        });

        let task = orchestrator.generate(&handle, &scene).unwrap();
        match task.wait() {
            Err(HlodError::WorkerPanicked(reason)) => assert!(reason.contains("plugin blew up")),
            other => panic!("expected WorkerPanicked, got {other:?}"),
        }
        // The active slot is released, not leaked by the unwinding worker.
        assert!(!orchestrator.is_building(handle.id()));

        let mut asset = handle.write();
        assert_eq!(asset.state(), BuildState::Failed);
        assert!(!asset.has_roots());
        asset.acknowledge_failure().unwrap();
        assert_eq!(asset.state(), BuildState::Idle);
        asset.settings.batcher = "material-group".to_string();
        drop(asset);

        // The asset stays fully usable afterwards.
        orchestrator.generate(&handle, &scene).unwrap().wait().unwrap();
        assert_eq!(handle.read().state(), BuildState::Built);
    }

    #[test]
    fn test_empty_registry_fails_before_any_state_change() {
        let orchestrator = Orchestrator::with_registry(Arc::new(StrategyRegistry::empty()));
        let scene = grid_scene(10, 3.0);
        let handle = HlodAssetHandle::new(test_settings());

        assert!(matches!(
            orchestrator.generate(&handle, &scene),
            Err(HlodError::NoImplementationsFound(
                hlod_core::StrategyCategory::Batcher
            ))
        ));
        let asset = handle.read();
        assert_eq!(asset.state(), BuildState::Idle);
        assert!(!asset.has_roots());
        assert!(!orchestrator.is_building(handle.id()));
    }

    #[test]
    fn test_missing_simplifier_category_detected() {
        let mut registry = StrategyRegistry::empty();
        registry
            .register_batcher(
                StrategyDescriptor {
                    name: "material-group",
                    options: &[],
                },
                || Box::new(MaterialGroupBatcher),
            )
            .unwrap();
        let orchestrator = Orchestrator::with_registry(Arc::new(registry));
        let handle = HlodAssetHandle::new(test_settings());

        assert!(matches!(
            orchestrator.generate(&handle, &grid_scene(5, 3.0)),
            Err(HlodError::NoImplementationsFound(
                hlod_core::StrategyCategory::Simplifier
            ))
        ));
    }

    #[test]
    fn test_unknown_strategy_name_rejected() {
        let orchestrator = Orchestrator::new();
        let handle = HlodAssetHandle::new(HlodSettings {
            simplifier: "decimate-pro".to_string(),
            ..test_settings()
        });

        assert!(matches!(
            orchestrator.generate(&handle, &grid_scene(5, 3.0)),
            Err(HlodError::UnknownStrategy { name, .. }) if name == "decimate-pro"
        ));
        assert_eq!(handle.read().state(), BuildState::Idle);
    }

    #[test]
    fn test_invalid_settings_rejected_up_front() {
        let orchestrator = Orchestrator::new();
        let handle = HlodAssetHandle::new(HlodSettings {
            lod_distance: 800.0,
            cull_distance: 100.0,
            ..test_settings()
        });

        assert!(matches!(
            orchestrator.generate(&handle, &grid_scene(5, 3.0)),
            Err(HlodError::Settings(_))
        ));
        assert!(!orchestrator.is_building(handle.id()));
    }

    #[test]
    fn test_progress_phases_arrive_in_pipeline_order() {
        let orchestrator = Orchestrator::new();
        let handle = HlodAssetHandle::new(test_settings());

        let task = orchestrator.generate(&handle, &grid_scene(50, 2.5)).unwrap();
        // Progress events all land before the worker deregisters itself.
        while orchestrator.is_building(handle.id()) {
            std::thread::sleep(Duration::from_millis(1));
        }
        let phases: Vec<BuildState> = task.drain_progress().iter().map(|p| p.phase).collect();
        let report = task.wait().unwrap();
        assert_eq!(report.operation, Operation::Generate);

        let order = |phase: BuildState| match phase {
            BuildState::Partitioning => 0,
            BuildState::Batching => 1,
            BuildState::Simplifying => 2,
            BuildState::Packaging => 3,
            other => panic!("unexpected phase {other}"),
        };
        assert!(!phases.is_empty());
        assert_eq!(phases[0], BuildState::Partitioning);
        assert!(phases.windows(2).all(|w| order(w[0]) <= order(w[1])));
        assert!(phases.contains(&BuildState::Packaging));
    }

    #[test]
    fn test_readers_never_observe_partial_roots() {
        let orchestrator = Orchestrator::with_registry(slow_registry());
        let scene = grid_scene(100, 2.0);
        let handle = HlodAssetHandle::new(slow_settings());

        let done = Arc::new(AtomicBool::new(false));
        let reader = {
            let handle = handle.clone();
            let done = Arc::clone(&done);
            std::thread::spawn(move || {
                while !done.load(Ordering::Relaxed) {
                    let asset = handle.read();
                    let state = asset.state();
                    // Built implies both roots; any active state implies none
                    // were installed yet for a first generate.
                    if state == BuildState::Built {
                        assert!(asset.has_roots());
                    }
                    if state.is_active() {
                        assert!(!asset.has_roots());
                    }
                    drop(asset);
                    std::thread::yield_now();
                }
            })
        };

        orchestrator.generate(&handle, &scene).unwrap().wait().unwrap();
        done.store(true, Ordering::Relaxed);
        reader.join().unwrap();
        assert!(handle.read().has_roots());
    }

    #[test]
    fn test_empty_scene_builds_empty_roots() {
        let orchestrator = Orchestrator::new();
        let scene = Arc::new(Scene::new("root"));
        let handle = HlodAssetHandle::new(test_settings());

        let report = orchestrator.generate(&handle, &scene).unwrap().wait().unwrap();
        assert_eq!(report.input_triangles, 0);
        assert_eq!(report.batches, 0);

        let asset = handle.read();
        assert_eq!(asset.state(), BuildState::Built);
        let roots = asset.roots().unwrap();
        assert!(roots.low.cells.is_empty());
        assert!(roots.high.root.members.is_empty());
    }

    #[test]
    fn test_cancel_without_active_task_is_noop() {
        let orchestrator = Orchestrator::new();
        let handle = HlodAssetHandle::new(test_settings());
        assert!(!orchestrator.cancel(handle.id()));
    }
}
