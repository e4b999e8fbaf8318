//! Contains termination criteria: cooperative checks performed between iterations which
//! never preempt an in-flight iteration.

mod max_generation;
pub use self::max_generation::MaxGeneration;

mod max_time;
pub use self::max_time::MaxTime;

mod no_improvement;
pub use self::no_improvement::NoImprovement;

use crate::solver::RefinementContext;

/// A trait which specifies the logic to determine when the search should stop.
pub trait Termination {
    /// Returns true when the refinement process should stop.
    fn is_termination(&self, refinement_ctx: &RefinementContext) -> bool;
}

/// A termination criterion which stops when any of its inner criteria is met.
pub struct CompositeTermination {
    terminations: Vec<Box<dyn Termination + Send + Sync>>,
}

impl CompositeTermination {
    /// Creates a new instance of `CompositeTermination`.
    pub fn new(terminations: Vec<Box<dyn Termination + Send + Sync>>) -> Self {
        Self { terminations }
    }
}

impl Termination for CompositeTermination {
    fn is_termination(&self, refinement_ctx: &RefinementContext) -> bool {
        self.terminations.iter().any(|termination| termination.is_termination(refinement_ctx))
    }
}
