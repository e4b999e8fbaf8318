//! Contains solution acceptance criteria used by the search loop.

mod greedy;
pub use self::greedy::GreedyAcceptance;

mod threshold;
pub use self::threshold::ThresholdAcceptance;

use crate::construction::heuristics::InsertionContext;
use crate::solver::RefinementContext;

/// A trait which decides whether a rebuilt solution should replace the working one.
pub trait SolutionAcceptor {
    /// Returns true if the given solution is accepted.
    fn is_accepted(&self, refinement_ctx: &RefinementContext, solution: &InsertionContext) -> bool;
}
