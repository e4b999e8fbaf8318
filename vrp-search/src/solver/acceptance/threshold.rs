#[cfg(test)]
#[path = "../../../tests/unit/solver/acceptance/threshold_test.rs"]
mod threshold_test;

use super::*;
use crate::models::common::Cost;
use crate::utils::{GenericError, GenericResult};

/// A threshold acceptance criterion in the spirit of Schrimpf et al.: a solution is
/// accepted if it is not worse than the best known one plus a threshold which decays
/// exponentially with the iteration number, so the search behaves explorative in the
/// warm-up phase and greedy afterwards.
pub struct ThresholdAcceptance {
    initial_threshold: Cost,
    half_life: f64,
}

impl ThresholdAcceptance {
    /// Creates a new instance of `ThresholdAcceptance`.
    pub fn new(initial_threshold: Cost, half_life: f64) -> GenericResult<Self> {
        if initial_threshold < 0. {
            return Err(GenericError::from("initial threshold must be non-negative"));
        }

        if half_life <= 0. {
            return Err(GenericError::from("threshold half life must be positive"));
        }

        Ok(Self { initial_threshold, half_life })
    }

    fn threshold(&self, generation: usize) -> Cost {
        self.initial_threshold * 0.5_f64.powf(generation as f64 / self.half_life)
    }
}

impl SolutionAcceptor for ThresholdAcceptance {
    fn is_accepted(&self, refinement_ctx: &RefinementContext, solution: &InsertionContext) -> bool {
        let threshold = self.threshold(refinement_ctx.statistics.generation);

        refinement_ctx.memory.best().map_or(true, |best| solution.get_fitness() <= best.get_fitness() + threshold)
    }
}
