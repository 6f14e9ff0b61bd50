//! The build pipeline run by a background worker thread.
//!
//! Phases run in a fixed order: partition, batch, simplify, package. The
//! worker checks the cancellation flag between groups; rollback on
//! cancellation or failure is handled by the orchestrator, which leaves the
//! asset's previous roots untouched.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crossbeam_channel::Sender;
use log::{debug, info};

use hlod_batch::{BatchInput, BatchingEngine, MeshBatch};
use hlod_core::{
    Aabb, BuildState, BuildWarning, GroupId, HlodAssetHandle, HlodError, HlodRoots, HlodSettings,
    LodRange, Scene,
};
use hlod_partition::{PartitionGroup, PartitionParams, partition_scene};
use hlod_simplify::SimplificationEngine;
use hlod_streaming::{CellGeometry, PackageInput, StreamingLayout};

use crate::state::Operation;
use crate::task::{BuildProgress, BuildReport};

/// Strategy instances resolved from the registry before the worker spawns,
/// so selection errors surface with zero side effects.
pub(crate) struct ResolvedStrategies {
    pub batching: BatchingEngine,
    pub simplification: SimplificationEngine,
    pub streaming: Box<dyn StreamingLayout>,
}

/// Everything one build worker needs.
pub(crate) struct BuildContext {
    pub operation: Operation,
    pub handle: HlodAssetHandle,
    pub scene: Arc<Scene>,
    pub settings: HlodSettings,
    pub range: LodRange,
    pub strategies: ResolvedStrategies,
    pub cancel: Arc<AtomicBool>,
    pub progress: Sender<BuildProgress>,
}

impl BuildContext {
    /// Marks the phase on the asset and emits a progress event. The write
    /// lock is held only for the state flip.
    fn enter_phase(&self, phase: BuildState, groups_total: usize) {
        self.handle.write().set_state(phase);
        self.emit(phase, 0, groups_total);
    }

    fn emit(&self, phase: BuildState, groups_done: usize, groups_total: usize) {
        // A dropped task handle is fine; the build still completes.
        let _ = self.progress.send(BuildProgress {
            phase,
            groups_done,
            groups_total,
        });
    }

    fn check_cancelled(&self) -> Result<(), HlodError> {
        if self.cancel.load(Ordering::Relaxed) {
            Err(HlodError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Runs the four build phases and returns the assembled roots plus a report.
///
/// # Errors
///
/// Returns [`HlodError::Cancelled`] when the flag is observed at a suspension
/// point, or [`HlodError::BatchingFailed`] from the batching engine. Either
/// way no partial output escapes: the roots are only produced on full
/// success.
pub(crate) fn run_pipeline(ctx: &BuildContext) -> Result<(HlodRoots, BuildReport), HlodError> {
    let started = Instant::now();

    // ---- Partitioning ----
    ctx.enter_phase(BuildState::Partitioning, 0);
    ctx.check_cancelled()?;
    let partition = partition_scene(&ctx.scene, &PartitionParams::from_settings(&ctx.settings));
    let leaves: Vec<&PartitionGroup> = partition
        .leaves()
        .into_iter()
        .filter(|leaf| !leaf.members.is_empty())
        .collect();
    debug!(
        "build {}: {} groups, {} non-empty leaves",
        ctx.operation,
        partition.group_count(),
        leaves.len()
    );

    // ---- Batching ----
    ctx.enter_phase(BuildState::Batching, leaves.len());
    let mut input_triangles = 0;
    let mut batched: Vec<(GroupId, Aabb, Vec<MeshBatch>)> = Vec::with_capacity(leaves.len());
    for (done, leaf) in leaves.iter().enumerate() {
        ctx.check_cancelled()?;
        let inputs: Vec<BatchInput<'_>> = leaf
            .members
            .iter()
            .filter_map(|&object| {
                ctx.scene
                    .object(object)
                    .mesh
                    .as_deref()
                    .map(|mesh| BatchInput { object, mesh })
            })
            .collect();
        input_triangles += inputs.iter().map(|i| i.mesh.triangle_count()).sum::<usize>();

        let batches =
            ctx.strategies
                .batching
                .batch_group(leaf.id, &inputs, &ctx.settings.batcher_options)?;
        batched.push((leaf.id, leaf.bounds, batches));
        ctx.emit(BuildState::Batching, done + 1, leaves.len());
    }
    let batch_total = batched.iter().map(|(_, _, b)| b.len()).sum::<usize>();

    // ---- Simplifying ----
    ctx.enter_phase(BuildState::Simplifying, batched.len());
    let mut warnings: Vec<BuildWarning> = Vec::new();
    let mut cells: Vec<CellGeometry> = Vec::with_capacity(batched.len());
    for (done, (group, bounds, batches)) in batched.iter().enumerate() {
        ctx.check_cancelled()?;
        let mut meshes = Vec::with_capacity(batches.len());
        for batch in batches {
            let (mesh, warning) = ctx.strategies.simplification.simplify_batch(
                *group,
                &batch.mesh,
                &ctx.settings.simplifier_options,
            );
            meshes.push(mesh);
            warnings.extend(warning);
        }
        cells.push(CellGeometry {
            group: *group,
            bounds: *bounds,
            meshes,
        });
        ctx.emit(BuildState::Simplifying, done + 1, batched.len());
    }

    // ---- Packaging ----
    ctx.enter_phase(BuildState::Packaging, 1);
    ctx.check_cancelled()?;
    let roots = ctx.strategies.streaming.package(
        &PackageInput {
            partition: &partition,
            cells: &cells,
            range: ctx.range,
        },
        &ctx.settings.streaming_options,
    );
    ctx.emit(BuildState::Packaging, 1, 1);

    let report = BuildReport {
        operation: ctx.operation,
        groups: partition.group_count(),
        batches: batch_total,
        input_triangles,
        output_triangles: roots.low.triangle_count(),
        warnings,
        elapsed: started.elapsed(),
    };
    info!(
        "build {}: {} triangles -> {} across {} batches in {:?} ({} warnings)",
        ctx.operation,
        report.input_triangles,
        report.output_triangles,
        report.batches,
        report.elapsed,
        report.warnings.len()
    );
    Ok((roots, report))
}
