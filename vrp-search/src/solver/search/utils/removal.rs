#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/utils/removal_test.rs"]
mod removal_test;

use crate::construction::heuristics::SolutionContext;
use crate::models::problem::{Actor, Job};
use crate::utils::{GenericError, GenericResult};
use std::collections::HashSet;
use std::sync::Arc;

/// Specifies a limit for the amount of jobs to be removed by a ruin operator.
#[derive(Clone)]
pub struct RemovalLimits {
    /// A portion of currently assigned jobs to be removed, in `[0., 1.]` range.
    pub removed_jobs_fraction: f64,
    /// A hard cap for the amount of removed jobs.
    pub max_removed_jobs: usize,
    /// A hard cap for the amount of affected routes.
    pub max_affected_routes: usize,
}

impl RemovalLimits {
    /// Creates a new instance of `RemovalLimits` validating the fraction range.
    pub fn new(removed_jobs_fraction: f64, max_affected_routes: usize) -> GenericResult<Self> {
        if !(0. ..=1.).contains(&removed_jobs_fraction) {
            return Err(GenericError::from(format!(
                "removed jobs fraction must be in [0, 1] range, got {removed_jobs_fraction}"
            )));
        }

        Ok(Self { removed_jobs_fraction, max_removed_jobs: usize::MAX, max_affected_routes })
    }
}

impl Default for RemovalLimits {
    fn default() -> Self {
        Self { removed_jobs_fraction: 0.1, max_removed_jobs: 30, max_affected_routes: 8 }
    }
}

/// Keeps track of the jobs removed by a ruin operator making sure that the configured
/// limits are not exceeded and locked jobs stay in place.
pub(crate) struct JobRemovalTracker {
    target_jobs: usize,
    max_affected_routes: usize,
    removed_jobs: HashSet<Job>,
    affected_actors: HashSet<Arc<Actor>>,
}

impl JobRemovalTracker {
    pub fn new(limits: &RemovalLimits, solution_ctx: &SolutionContext) -> Self {
        let assigned = solution_ctx.routes.iter().map(|route_ctx| route_ctx.route().tour.job_count()).sum::<usize>();

        let target_jobs = ((assigned as f64 * limits.removed_jobs_fraction).round() as usize).min(limits.max_removed_jobs);

        Self {
            target_jobs,
            max_affected_routes: limits.max_affected_routes,
            removed_jobs: HashSet::default(),
            affected_actors: HashSet::default(),
        }
    }

    pub fn is_limit(&self) -> bool {
        self.removed_jobs.len() >= self.target_jobs || self.affected_actors.len() >= self.max_affected_routes
    }

    pub fn is_removed_job(&self, job: &Job) -> bool {
        self.removed_jobs.contains(job)
    }

    pub fn get_removed_jobs(&self) -> usize {
        self.removed_jobs.len()
    }

    /// Removes the job from the route at `route_idx` moving it back to the required list.
    /// The route keeps no dangling references: all job activities leave the tour at once.
    pub fn try_remove_job(&mut self, solution_ctx: &mut SolutionContext, route_idx: usize, job: &Job) -> bool {
        if solution_ctx.locked.contains(job) || self.removed_jobs.contains(job) {
            return false;
        }

        let route_ctx = match solution_ctx.routes.get_mut(route_idx) {
            Some(route_ctx) => route_ctx,
            None => return false,
        };

        if !route_ctx.route().tour.contains(job) {
            return false;
        }

        let actor = route_ctx.route().actor.clone();
        assert!(route_ctx.route_mut().tour.remove(job));

        solution_ctx.required.push(job.clone());
        self.removed_jobs.insert(job.clone());
        self.affected_actors.insert(actor);

        true
    }
}
