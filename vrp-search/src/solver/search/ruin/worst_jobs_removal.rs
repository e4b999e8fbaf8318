#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/ruin/worst_jobs_removal_test.rs"]
mod worst_jobs_removal_test;

use super::*;
use crate::models::common::Cost;
use crate::models::problem::{Job, TransportCost, TravelTime};
use crate::models::solution::Route;
use crate::solver::search::{JobRemovalTracker, RemovalLimits};

/// A ruin strategy which removes jobs with the highest cost savings: the jobs which
/// contribute most to the route cost are the most promising candidates to be placed
/// somewhere else.
pub struct WorstJobRemoval {
    power: i32,
    limits: RemovalLimits,
}

impl WorstJobRemoval {
    /// Creates a new instance of `WorstJobRemoval`. The `power` parameter skews the
    /// randomized selection towards the worst jobs: the higher the power, the greedier
    /// the choice.
    pub fn new(power: i32, limits: RemovalLimits) -> Self {
        assert!(power > 0);

        Self { power, limits }
    }
}

impl Default for WorstJobRemoval {
    fn default() -> Self {
        Self::new(3, RemovalLimits::default())
    }
}

impl Ruin for WorstJobRemoval {
    fn run(&self, refinement_ctx: &RefinementContext, mut insertion_ctx: InsertionContext) -> InsertionContext {
        if insertion_ctx.solution.routes.is_empty() {
            return insertion_ctx;
        }

        let transport = refinement_ctx.problem.transport.clone();
        let random = insertion_ctx.environment.random.clone();

        let mut tracker = JobRemovalTracker::new(&self.limits, &insertion_ctx.solution);

        // collect (route_idx, job, cost savings) triples, worst first
        let mut savings: Vec<(usize, Job, Cost)> = insertion_ctx
            .solution
            .routes
            .iter()
            .enumerate()
            .flat_map(|(route_idx, route_ctx)| {
                let route = route_ctx.route();
                route
                    .tour
                    .jobs()
                    .filter(|job| !insertion_ctx.solution.locked.contains(job))
                    .map(|job| {
                        let cost = estimate_removal_saving(route, &job, transport.as_ref());
                        (route_idx, job, cost)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        savings.sort_by(|(_, _, a), (_, _, b)| b.total_cmp(a));

        while !tracker.is_limit() && !savings.is_empty() {
            let skewed = random.uniform_real(0., 1.).powi(self.power);
            let index = (skewed * savings.len() as f64) as usize;
            let (route_idx, job, _) = savings.remove(index.min(savings.len() - 1));

            tracker.try_remove_job(&mut insertion_ctx.solution, route_idx, &job);
        }

        insertion_ctx
    }
}

/// Estimates the route cost saved by removing all activities of the job: for each of its
/// activities, the detour cost of serving it between its neighbours.
fn estimate_removal_saving(route: &Route, job: &Job, transport: &(dyn TransportCost + Send + Sync)) -> Cost {
    let tour = &route.tour;

    tour.all_activities()
        .enumerate()
        .filter(|(_, activity)| activity.has_same_job(job))
        .map(|(idx, activity)| {
            let prev = idx.checked_sub(1).and_then(|prev_idx| tour.get(prev_idx));
            let next = tour.get(idx + 1);

            match (prev, next) {
                (Some(prev), Some(next)) => {
                    let departure = prev.schedule.departure;

                    transport.cost(route, prev.place.location, activity.place.location, TravelTime::Departure(departure))
                        + transport.cost(route, activity.place.location, next.place.location, TravelTime::Departure(departure))
                        - transport.cost(route, prev.place.location, next.place.location, TravelTime::Departure(departure))
                }
                (Some(prev), None) => {
                    let departure = prev.schedule.departure;
                    transport.cost(route, prev.place.location, activity.place.location, TravelTime::Departure(departure))
                }
                _ => Cost::default(),
            }
        })
        .sum()
}
