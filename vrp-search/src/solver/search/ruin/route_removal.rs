#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/ruin/route_removal_test.rs"]
mod route_removal_test;

use super::*;
use crate::solver::search::{JobRemovalTracker, RemovalLimits};

/// A ruin strategy which removes whole random routes from the solution.
pub struct RandomRouteRemoval {
    /// Specifies limits for job removal.
    limits: RemovalLimits,
}

impl RandomRouteRemoval {
    /// Creates a new instance of `RandomRouteRemoval`.
    pub fn new(limits: RemovalLimits) -> Self {
        Self { limits }
    }
}

impl Default for RandomRouteRemoval {
    fn default() -> Self {
        Self::new(RemovalLimits { max_affected_routes: 2, ..RemovalLimits::default() })
    }
}

impl Ruin for RandomRouteRemoval {
    fn run(&self, _: &RefinementContext, mut insertion_ctx: InsertionContext) -> InsertionContext {
        if insertion_ctx.solution.routes.is_empty() {
            return insertion_ctx;
        }

        let random = insertion_ctx.environment.random.clone();
        let mut tracker = JobRemovalTracker::new(&self.limits, &insertion_ctx.solution);

        for _ in 0..self.limits.max_affected_routes {
            if tracker.is_limit() || insertion_ctx.solution.routes.is_empty() {
                break;
            }

            let route_idx =
                random.uniform_int(0, (insertion_ctx.solution.routes.len() - 1) as i32) as usize;
            let jobs: Vec<_> = insertion_ctx.solution.routes[route_idx].route().tour.jobs().collect();

            jobs.iter().for_each(|job| {
                tracker.try_remove_job(&mut insertion_ctx.solution, route_idx, job);
            });
        }

        insertion_ctx
    }
}
