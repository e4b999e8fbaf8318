use super::*;

/// A recreate method which always inserts the job with the globally cheapest insertion
/// cost first.
pub struct RecreateWithCheapest {
    recreate: ConfigurableRecreate,
}

impl Default for RecreateWithCheapest {
    fn default() -> Self {
        Self {
            recreate: ConfigurableRecreate::new(
                Box::<AllJobSelector>::default(),
                Box::<AllRouteSelector>::default(),
                Box::<BestResultSelector>::default(),
                InsertionHeuristic::default(),
            ),
        }
    }
}

impl Recreate for RecreateWithCheapest {
    fn run(&self, refinement_ctx: &RefinementContext, insertion_ctx: InsertionContext) -> InsertionContext {
        self.recreate.run(refinement_ctx, insertion_ctx)
    }
}
