use super::*;
use crate::utils::{Noise, Random};

/// A recreate method which perturbs the insertion costs with noise, so the construction
/// deviates from the pure cheapest insertion trajectory.
pub struct RecreateWithPerturbation {
    recreate: ConfigurableRecreate,
}

impl RecreateWithPerturbation {
    /// Creates a new instance of `RecreateWithPerturbation`.
    pub fn new(noise: Noise) -> Self {
        Self {
            recreate: ConfigurableRecreate::new(
                Box::<AllJobSelector>::default(),
                Box::<AllRouteSelector>::default(),
                Box::new(NoiseResultSelector::new(noise)),
                InsertionHeuristic::default(),
            ),
        }
    }

    /// Creates a default instance of `RecreateWithPerturbation`: costs are scaled by a
    /// value from `[0.75, 1.25)` range with 0.05 probability.
    pub fn new_with_defaults(random: std::sync::Arc<dyn Random + Send + Sync>) -> Self {
        Self::new(Noise::new_with_ratio(0.05, (0.75, 1.25), random))
    }
}

impl Recreate for RecreateWithPerturbation {
    fn run(&self, refinement_ctx: &RefinementContext, insertion_ctx: InsertionContext) -> InsertionContext {
        self.recreate.run(refinement_ctx, insertion_ctx)
    }
}
