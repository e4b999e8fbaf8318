//! An objective which penalizes unassigned jobs in the solution cost.

use crate::construction::heuristics::*;
use crate::models::common::Cost;
use crate::models::*;
use crate::utils::{GenericError, GenericResult};

/// Creates a feature which penalizes each unassigned job with a fixed cost, so solutions
/// serving more jobs always win over cheaper solutions serving fewer of them.
pub fn create_minimize_unassigned_jobs_feature(name: &str, unassigned_penalty: Cost) -> GenericResult<Feature> {
    if unassigned_penalty < 0. {
        return Err(GenericError::from("unassigned penalty must be non-negative"));
    }

    FeatureBuilder::default()
        .with_name(name)
        .with_objective(MinimizeUnassignedObjective { unassigned_penalty })
        .build()
}

struct MinimizeUnassignedObjective {
    unassigned_penalty: Cost,
}

impl FeatureObjective for MinimizeUnassignedObjective {
    fn fitness(&self, insertion_ctx: &InsertionContext) -> Cost {
        let unassigned = insertion_ctx.solution.unassigned.len() + insertion_ctx.solution.required.len();

        self.unassigned_penalty * unassigned as Cost
    }

    fn estimate(&self, _: &MoveContext<'_>) -> Cost {
        Cost::default()
    }
}
