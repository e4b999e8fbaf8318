#[cfg(test)]
#[path = "../../../tests/unit/solver/acceptance/greedy_test.rs"]
mod greedy_test;

use super::*;

/// A greedy acceptance criterion: accepts a solution only if it is not worse than the best
/// known one.
#[derive(Default)]
pub struct GreedyAcceptance {}

impl SolutionAcceptor for GreedyAcceptance {
    fn is_accepted(&self, refinement_ctx: &RefinementContext, solution: &InsertionContext) -> bool {
        refinement_ctx.memory.best().map_or(true, |best| solution.get_fitness() <= best.get_fitness())
    }
}
