#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/ruin/random_job_removal_test.rs"]
mod random_job_removal_test;

use super::*;
use crate::solver::search::{JobRemovalTracker, RemovalLimits, select_seed_job};
use std::cell::RefCell;

/// A ruin strategy which removes a random portion of assigned jobs from the solution.
pub struct RandomJobRemoval {
    /// Specifies limits for job removal.
    limits: RemovalLimits,
}

impl RandomJobRemoval {
    /// Creates a new instance of `RandomJobRemoval`.
    pub fn new(limits: RemovalLimits) -> Self {
        Self { limits }
    }
}

impl Default for RandomJobRemoval {
    fn default() -> Self {
        Self::new(RemovalLimits::default())
    }
}

impl Ruin for RandomJobRemoval {
    fn run(&self, _: &RefinementContext, mut insertion_ctx: InsertionContext) -> InsertionContext {
        if insertion_ctx.solution.routes.is_empty() {
            return insertion_ctx;
        }

        let tracker = RefCell::new(JobRemovalTracker::new(&self.limits, &insertion_ctx.solution));
        let assigned =
            insertion_ctx.solution.routes.iter().map(|route_ctx| route_ctx.route().tour.job_count()).sum::<usize>();

        (0..assigned).take_while(|_| !tracker.borrow().is_limit()).for_each(|_| {
            let seed = {
                let solution = &insertion_ctx.solution;
                let tracker = tracker.borrow();
                select_seed_job(
                    solution.routes.as_slice(),
                    insertion_ctx.environment.random.as_ref(),
                    &|_| true,
                    &|job| !solution.locked.contains(job) && !tracker.is_removed_job(job),
                )
            };

            if let Some((_, route_idx, job)) = seed {
                tracker.borrow_mut().try_remove_job(&mut insertion_ctx.solution, route_idx, &job);
            }
        });

        insertion_ctx
    }
}
