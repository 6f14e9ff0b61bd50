//! Demo binary that builds an HLOD hierarchy for a synthetic scene.
//!
//! Settings are loaded from a RON file when `--settings` is given and can be
//! overridden via CLI flags.
//! Run with `cargo run -p hlod-demo` for a 100-mesh grid.
//! Run with `cargo run -p hlod-demo -- --meshes 500 --simplifier edge-collapse`
//! to stress a different strategy.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use glam::Vec3;
use tracing::info;

use hlod_core::{
    HlodAssetHandle, HlodSettings, MaterialId, MeshData, Scene, StrategyCategory, VertexFormat,
};
use hlod_log::init_logging;
use hlod_pipeline::{BuildTask, Orchestrator};

#[derive(Parser)]
#[command(about = "Builds an HLOD hierarchy for a synthetic grid scene")]
struct Args {
    /// Number of meshes in the synthetic grid.
    #[arg(long, default_value_t = 100)]
    meshes: usize,

    /// Spacing between grid cells, in world units.
    #[arg(long, default_value_t = 2.0)]
    spacing: f32,

    /// RON settings file; defaults apply when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Batching strategy override.
    #[arg(long)]
    batcher: Option<String>,

    /// Simplification strategy override.
    #[arg(long)]
    simplifier: Option<String>,

    /// Streaming strategy override.
    #[arg(long)]
    streaming: Option<String>,

    /// Triangle budget per batch, as a fraction of its input count.
    #[arg(long)]
    target_ratio: Option<f32>,

    /// Destroy the hierarchy again after building it.
    #[arg(long)]
    destroy: bool,

    /// List the registered strategies and exit.
    #[arg(long)]
    list_strategies: bool,

    /// Directory for a JSON log file.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log filter override (e.g. "debug,hlod_simplify=trace").
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    let args = Args::parse();
    init_logging(args.log_dir.as_deref(), args.log_level.as_deref());

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let orchestrator = Orchestrator::new();

    if args.list_strategies {
        for category in [
            StrategyCategory::Batcher,
            StrategyCategory::Simplifier,
            StrategyCategory::Streaming,
        ] {
            println!("{category}:");
            for descriptor in orchestrator.registry().descriptors(category)? {
                println!("  {}", descriptor.name);
                for option in descriptor.options {
                    println!("    {} (default {}): {}", option.key, option.default, option.doc);
                }
            }
        }
        return Ok(());
    }

    let settings = load_settings(args)?;
    let scene = Arc::new(grid_scene(args.meshes, args.spacing));
    info!(
        meshes = args.meshes,
        batcher = %settings.batcher,
        simplifier = %settings.simplifier,
        streaming = %settings.streaming,
        "starting build"
    );

    let handle = HlodAssetHandle::new(settings);
    let task = orchestrator.generate(&handle, &scene)?;
    report(drive(&orchestrator, &handle, task)?);

    if args.destroy {
        orchestrator.destroy(&handle)?.wait()?;
        info!("hierarchy destroyed, asset back to {}", handle.read().state());
    }
    Ok(())
}

fn load_settings(args: &Args) -> Result<HlodSettings, Box<dyn Error>> {
    let mut settings = match &args.settings {
        Some(path) => HlodSettings::load(path)?,
        None => HlodSettings {
            min_group_size: 5.0,
            threshold_size: 10.0,
            ..Default::default()
        },
    };
    if let Some(batcher) = &args.batcher {
        settings.batcher = batcher.clone();
    }
    if let Some(simplifier) = &args.simplifier {
        settings.simplifier = simplifier.clone();
    }
    if let Some(streaming) = &args.streaming {
        settings.streaming = streaming.clone();
    }
    if let Some(ratio) = args.target_ratio {
        settings
            .simplifier_options
            .set("target_ratio", format!("{ratio}"));
    }
    settings.validate()?;
    Ok(settings)
}

/// Polls progress while the build runs, then returns the final report.
fn drive(
    orchestrator: &Orchestrator,
    handle: &HlodAssetHandle,
    task: BuildTask,
) -> Result<hlod_pipeline::BuildReport, Box<dyn Error>> {
    while orchestrator.is_building(handle.id()) {
        for event in task.drain_progress() {
            info!(
                phase = %event.phase,
                done = event.groups_done,
                total = event.groups_total,
                "progress"
            );
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    Ok(task.wait()?)
}

fn report(report: hlod_pipeline::BuildReport) {
    info!(
        groups = report.groups,
        batches = report.batches,
        input_triangles = report.input_triangles,
        output_triangles = report.output_triangles,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "build finished"
    );
    for warning in &report.warnings {
        tracing::warn!("{warning}");
    }
}

/// Synthetic scene: `count` unit cubes laid out on a square grid.
fn grid_scene(count: usize, spacing: f32) -> Scene {
    let mut scene = Scene::new("demo");
    let side = (count as f32).sqrt().ceil() as usize;
    for i in 0..count {
        let x = (i % side) as f32 * spacing;
        let z = (i / side) as f32 * spacing;
        let id = scene.add_object(scene.root(), format!("cube-{i}"));
        scene.set_mesh(id, Arc::new(unit_cube_at(Vec3::new(x, 0.0, z), (i % 3) as u16)));
    }
    scene
}

fn unit_cube_at(center: Vec3, material: u16) -> MeshData {
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
    MeshData::new(positions, indices, MaterialId(material), VertexFormat::Position)
}
