//! Error taxonomy of the build pipeline.
//!
//! Hard failures ([`HlodError`]) abort a build and leave the asset's roots
//! untouched. Soft degradations ([`BuildWarning`]) are collected and returned
//! alongside a successful result.

use thiserror::Error;

use crate::asset::BuildState;
use crate::scene::GroupId;
use crate::strategy::StrategyCategory;

/// Errors that can occur when validating, loading, or saving build settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `min_group_size` must be strictly positive.
    #[error("min_group_size must be > 0, got {0}")]
    NonPositiveMinGroupSize(f32),

    /// `threshold_size` must be strictly positive.
    #[error("threshold_size must be > 0, got {0}")]
    NonPositiveThresholdSize(f32),

    /// The LOD switch distance must be non-negative and strictly below the
    /// cull distance.
    #[error("invalid distance range: lod_distance {lod} must be >= 0 and < cull_distance {cull}")]
    InvalidDistanceRange { lod: f32, cull: f32 },

    /// Failed to read the settings file from disk.
    #[error("failed to read settings: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to write the settings file to disk.
    #[error("failed to write settings: {0}")]
    Write(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse settings: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// Failed to serialize settings to RON.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] ron::Error),
}

/// Hard failures of the build pipeline.
#[derive(Debug, Error)]
pub enum HlodError {
    /// A strategy category has zero registered implementations.
    #[error("no {0} implementations are registered")]
    NoImplementationsFound(StrategyCategory),

    /// The selected strategy name is not present in the registry.
    #[error("unknown {category} strategy `{name}`")]
    UnknownStrategy {
        category: StrategyCategory,
        name: String,
    },

    /// A partition group's meshes could not be merged under the selected
    /// batching strategy. Aborts the whole build.
    #[error("batching failed for group {group}: {reason}")]
    BatchingFailed { group: GroupId, reason: String },

    /// Another build task is already active for this asset.
    #[error("a build is already in progress for this asset")]
    BuildAlreadyInProgress,

    /// The requested operation is not valid in the asset's current state,
    /// e.g. `Update` on an asset that was never generated.
    #[error("{operation} is not valid while the asset is {state}")]
    InvalidStateTransition {
        state: BuildState,
        operation: &'static str,
    },

    /// The build task was cancelled at a suspension point. Rollback is
    /// identical to a failure; only the reported reason differs.
    #[error("build was cancelled")]
    Cancelled,

    /// The build worker terminated without reporting a result.
    #[error("build worker disconnected before reporting a result")]
    WorkerDisconnected,

    /// A strategy panicked inside the build worker. The panic is caught and
    /// rolled back like any other failure; the payload message is preserved.
    #[error("build worker panicked: {0}")]
    WorkerPanicked(String),

    /// The supplied settings failed validation.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Soft degradations recorded during an otherwise successful build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildWarning {
    /// A simplifier could not reach its triangle budget and returned its best
    /// achievable result instead.
    BudgetNotMet {
        group: GroupId,
        target_triangles: usize,
        achieved_triangles: usize,
    },
}

impl std::fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BudgetNotMet {
                group,
                target_triangles,
                achieved_triangles,
            } => write!(
                f,
                "group {group}: simplification budget not met \
                 (target {target_triangles} triangles, achieved {achieved_triangles})"
            ),
        }
    }
}
