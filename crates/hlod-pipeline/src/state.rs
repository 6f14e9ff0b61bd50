//! Entry rules of the build state machine.
//!
//! The per-phase transitions (`Partitioning` → `Batching` → ...) are driven by
//! the build worker; this module only guards the three public entry points.

use hlod_core::{BuildState, HlodError};

/// Public operations a caller can request on an asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Build the hierarchy for the first time. Valid from `Idle`.
    Generate,
    /// Rebuild the hierarchy in place. Valid from `Built`.
    Update,
    /// Remove the hierarchy and restore the source scene. Valid from `Built`.
    Destroy,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Update => "update",
            Self::Destroy => "destroy",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Checks whether `operation` may start while the asset is in `state`.
///
/// # Errors
///
/// Returns [`HlodError::InvalidStateTransition`] for every disallowed pair,
/// including any request while a build is active or a failure is
/// unacknowledged.
pub fn check_entry(state: BuildState, operation: Operation) -> Result<(), HlodError> {
    let allowed = match operation {
        Operation::Generate => state == BuildState::Idle,
        Operation::Update | Operation::Destroy => state == BuildState::Built,
    };
    if allowed {
        Ok(())
    } else {
        Err(HlodError::InvalidStateTransition {
            state,
            operation: operation.name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [BuildState; 8] = [
        BuildState::Idle,
        BuildState::Partitioning,
        BuildState::Batching,
        BuildState::Simplifying,
        BuildState::Packaging,
        BuildState::Built,
        BuildState::Destroying,
        BuildState::Failed,
    ];

    #[test]
    fn test_generate_only_from_idle() {
        for state in ALL_STATES {
            let result = check_entry(state, Operation::Generate);
            if state == BuildState::Idle {
                assert!(result.is_ok());
            } else {
                assert!(matches!(
                    result,
                    Err(HlodError::InvalidStateTransition { operation: "generate", .. })
                ));
            }
        }
    }

    #[test]
    fn test_update_and_destroy_only_from_built() {
        for operation in [Operation::Update, Operation::Destroy] {
            for state in ALL_STATES {
                let result = check_entry(state, operation);
                assert_eq!(result.is_ok(), state == BuildState::Built, "{operation} from {state}");
            }
        }
    }

    #[test]
    fn test_failed_state_blocks_everything() {
        for operation in [Operation::Generate, Operation::Update, Operation::Destroy] {
            assert!(check_entry(BuildState::Failed, operation).is_err());
        }
    }
}
