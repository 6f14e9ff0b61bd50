//! Engine wrapper that applies a strategy and records budget warnings.

use log::{debug, warn};

use hlod_core::{BuildWarning, GroupId, MeshData, StrategyConfig};

use crate::{Simplifier, SimplifyTarget};

/// Runs the selected simplification strategy over batched geometry.
pub struct SimplificationEngine {
    strategy: Box<dyn Simplifier>,
}

impl SimplificationEngine {
    pub fn new(strategy: Box<dyn Simplifier>) -> Self {
        Self { strategy }
    }

    /// Simplifies one batch. A missed budget is returned as a warning
    /// alongside the best-effort mesh; the build proceeds. Output with more
    /// triangles than the input is discarded in favor of the input mesh.
    pub fn simplify_batch(
        &self,
        group: GroupId,
        mesh: &MeshData,
        options: &StrategyConfig,
    ) -> (MeshData, Option<BuildWarning>) {
        let target = SimplifyTarget::from_options(options);
        let input_triangles = mesh.triangle_count();
        let target_triangles = target.target_triangles(input_triangles);
        let outcome = self.strategy.simplify(mesh, &target, options);

        // Strategies must never increase the triangle count. A violator's
        // output is discarded so inflated geometry cannot reach the roots;
        // the untouched input is the best result we can still vouch for.
        let (out, budget_met) = if outcome.mesh.triangle_count() > input_triangles {
            warn!(
                "group {group}: simplifier returned {} triangles for {} input, keeping the input mesh",
                outcome.mesh.triangle_count(),
                input_triangles
            );
            (mesh.clone(), input_triangles <= target_triangles)
        } else {
            (outcome.mesh, outcome.budget_met)
        };

        let warning = if budget_met {
            None
        } else {
            Some(BuildWarning::BudgetNotMet {
                group,
                target_triangles,
                achieved_triangles: out.triangle_count(),
            })
        };

        debug!(
            "group {group}: simplified {} -> {} triangles (budget met: {})",
            input_triangles,
            out.triangle_count(),
            budget_met
        );
        (out, warning)
    }
}
