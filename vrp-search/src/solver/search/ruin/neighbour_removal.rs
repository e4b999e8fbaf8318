#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/ruin/neighbour_removal_test.rs"]
mod neighbour_removal_test;

use super::*;
use crate::solver::search::{JobRemovalTracker, RemovalLimits, get_route_jobs, select_seed_job};
use std::cell::RefCell;

/// A radial ruin strategy: removes a randomly selected seed job together with jobs in its
/// neighbourhood (by the problem's proximity metric), producing a spatially coherent gap
/// which tends to reinsert better than scattered removal.
pub struct NeighbourRemoval {
    /// Specifies limits for job removal.
    limits: RemovalLimits,
}

impl NeighbourRemoval {
    /// Creates a new instance of `NeighbourRemoval`.
    pub fn new(limits: RemovalLimits) -> Self {
        Self { limits }
    }
}

impl Default for NeighbourRemoval {
    fn default() -> Self {
        Self::new(RemovalLimits::default())
    }
}

impl Ruin for NeighbourRemoval {
    fn run(&self, _: &RefinementContext, mut insertion_ctx: InsertionContext) -> InsertionContext {
        if insertion_ctx.solution.routes.is_empty() {
            return insertion_ctx;
        }

        let problem = insertion_ctx.problem.clone();
        let random = insertion_ctx.environment.random.clone();

        let tracker = RefCell::new(JobRemovalTracker::new(&self.limits, &insertion_ctx.solution));
        let mut route_jobs = get_route_jobs(&insertion_ctx.solution);

        let seed = {
            let solution = &insertion_ctx.solution;
            select_seed_job(solution.routes.as_slice(), random.as_ref(), &|_| true, &|job| {
                !solution.locked.contains(job)
            })
        };

        let Some((profile, route_idx, seed_job)) = seed else {
            return insertion_ctx;
        };

        tracker.borrow_mut().try_remove_job(&mut insertion_ctx.solution, route_idx, &seed_job);

        problem
            .jobs
            .neighbors(&profile, &seed_job)
            .take_while(|_| !tracker.borrow().is_limit())
            .for_each(|(job, _)| {
                if let Some(&route_idx) = route_jobs.get(job) {
                    if tracker.borrow_mut().try_remove_job(&mut insertion_ctx.solution, route_idx, job) {
                        route_jobs.remove(job);
                    }
                }
            });

        insertion_ctx
    }
}
